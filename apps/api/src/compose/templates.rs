//! Mock drafting templates.
//!
//! Pure functions from entity data (plus a tone variant for emails) to text.
//! The brief output uses the same heading marker the section editor splits
//! on, so a drafted brief always parses into editable sections.

use super::{BriefContext, EmailRequest, EmailTone};

/// "$480K" / "$1.2M" style compact ARR formatting.
pub fn format_arr(arr: u64) -> String {
    if arr >= 1_000_000 {
        let millions = arr as f64 / 1_000_000.0;
        format!("${millions:.1}M")
    } else {
        format!("${}K", arr / 1_000)
    }
}

pub fn health_label(health: u8) -> &'static str {
    match health {
        80..=u8::MAX => "healthy",
        60..=79 => "stable",
        40..=59 => "at risk",
        _ => "critical",
    }
}

pub fn render_brief(ctx: &BriefContext) -> String {
    let account = &ctx.account;
    let health = health_label(account.health);
    let mut brief = format!(
        "# Handoff Brief: {name}\n\
         ## Overview [via CRM]\n\
         {name} is a {segment} {industry} account at {arr} ARR, owned by {from} and moving to {to}.\n\
         Current health sits at **{health_score}/100** ({health}).\n\
         ## Relationship Health\n\
         - Renewal conversations have been led by {from} to date.\n\
         - **{to}** takes over as the primary contact after the intro call.\n",
        name = account.name,
        segment = account.segment.label(),
        industry = account.industry,
        arr = format_arr(account.arr),
        from = ctx.from_rep.name,
        to = ctx.to_rep.name,
        health_score = account.health,
        health = health,
    );

    brief.push_str("## Risks\n");
    if account.health < 60 {
        brief.push_str(&format!(
            "⚠ Health score of {} needs attention before the handoff completes.\n",
            account.health
        ));
    }
    brief.push_str(&format!(
        "- Ownership change lands mid-cycle; keep {} cc'd until the first sync.\n\
         - Watch for open support threads that predate the transition.\n",
        ctx.from_rep.name
    ));

    brief.push_str(&format!(
        "## Next Steps\n\
         1. {to} reviews account history and recent calls.\n\
         2. {from} sends the introduction email.\n\
         3. Joint call within the SLA window to confirm continuity.\n\
         ## Talking Points\n\
         - **Continuity**: nothing changes about the support model.\n\
         - **{segment} focus**: {to} works {segment} accounts day to day.",
        to = ctx.to_rep.name,
        from = ctx.from_rep.name,
        segment = account.segment.label(),
    ));

    brief
}

pub fn render_email(req: &EmailRequest) -> String {
    let summary = req.brief_summary.trim();
    match req.tone {
        EmailTone::Professional => format!(
            "Subject: Introducing {to}, your new account manager\n\
             \n\
             Hi {contact},\n\
             \n\
             I wanted to let you know that {to} will be taking over as the primary \
             account manager for {account}. {to} has full context on our work together: \
             {summary}\n\
             \n\
             I will remain available through the transition, and {to} will reach out \
             shortly to set up an introduction.\n\
             \n\
             Best regards,\n\
             {from}",
            to = req.to_owner,
            contact = req.contact_name,
            account = req.account_name,
            summary = summary,
            from = req.from_owner,
        ),
        EmailTone::Warm => format!(
            "Subject: A warm introduction\n\
             \n\
             Hi {contact},\n\
             \n\
             It has been a pleasure working with you and the {account} team. I am \
             handing the reins to my colleague {to}, who I know you will enjoy \
             working with. A quick snapshot of where things stand: {summary}\n\
             \n\
             {to} will drop you a note this week. Thank you for everything, and do \
             stay in touch!\n\
             \n\
             Warmly,\n\
             {from}",
            contact = req.contact_name,
            account = req.account_name,
            to = req.to_owner,
            summary = summary,
            from = req.from_owner,
        ),
        EmailTone::Concise => format!(
            "Subject: New account manager for {account}\n\
             \n\
             Hi {contact},\n\
             \n\
             Quick update: {to} is taking over {account} from me. Context: {summary}\n\
             \n\
             {to} will be in touch. Questions welcome in the meantime.\n\
             \n\
             Thanks,\n\
             {from}",
            account = req.account_name,
            contact = req.contact_name,
            to = req.to_owner,
            summary = summary,
            from = req.from_owner,
        ),
    }
}

/// Rewrites a section by appending a sharpened line, so regenerated text
/// always differs from what it replaces.
pub fn refine_section(heading: &str, body: &str) -> String {
    let topic = heading
        .trim_start_matches('#')
        .trim()
        .to_lowercase();
    let addition = if topic.is_empty() {
        "Refined with the latest account activity in mind.".to_string()
    } else {
        format!("Refined {topic} guidance with the latest account activity in mind.")
    };
    if body.is_empty() {
        addition
    } else {
        format!("{body}\n{addition}")
    }
}
