//! Prompt constants and builders for the drafting calls.

use crate::compose::{BriefContext, EmailRequest, EmailTone};

pub const BRIEF_SYSTEM: &str = "You are an assistant drafting internal account handoff briefs \
for a customer success team. Write in markdown using '## ' section headings \
(Overview, Relationship Health, Risks, Next Steps, Talking Points). Be factual \
and specific to the data provided; never invent account history.";

pub const EMAIL_SYSTEM: &str = "You draft short, customer-facing introduction emails for account \
manager transitions. Plain text only, no markdown. Keep it under 180 words, \
reference the relationship context provided, and close with the departing \
owner's name.";

pub fn brief_prompt(ctx: &BriefContext) -> String {
    format!(
        "Draft a handoff brief for this transition.\n\
         Account: {} ({} / {})\n\
         ARR: {}\n\
         Health score: {}/100\n\
         Departing owner: {}\n\
         New owner: {} (specialties: {})",
        ctx.account.name,
        ctx.account.segment.label(),
        ctx.account.industry,
        ctx.account.arr,
        ctx.account.health,
        ctx.from_rep.name,
        ctx.to_rep.name,
        ctx.to_rep.specialties.join(", "),
    )
}

pub fn email_prompt(req: &EmailRequest) -> String {
    let tone = match req.tone {
        EmailTone::Professional => "professional and measured",
        EmailTone::Warm => "warm and personal",
        EmailTone::Concise => "brief and direct",
    };
    format!(
        "Draft the introduction email.\n\
         Account: {}\n\
         Contact: {} ({})\n\
         Departing owner: {}\n\
         New owner: {}\n\
         Relationship summary: {}\n\
         Tone: {tone}",
        req.account_name,
        req.contact_name,
        req.contact_title,
        req.from_owner,
        req.to_owner,
        req.brief_summary,
    )
}

pub fn section_prompt(heading: &str, body: &str) -> String {
    format!(
        "Rewrite this brief section. Keep it grounded in the existing \
         content; tighten the language and add nothing speculative.\n\
         Heading: {heading}\n\
         Current text:\n{body}"
    )
}
