//! Command execution - one function per subcommand
//!
//! Each function talks to the daemon through [`CoraClient`] and renders a
//! human-readable result. `--json` paths print the raw payload and nothing
//! else so they stay scriptable.

use anyhow::Result;
use console::style;
use cora_common::{PaymentStatus, VerifyResponse};
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::client::CoraClient;

pub async fn status(client: &CoraClient, json: bool) -> Result<()> {
    let health = client.health().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    println!("{} corad v{}", "●".green(), health.version);
    println!("  Status:          {}", style(&health.status).green());
    println!("  Uptime:          {}", format_uptime(health.uptime_seconds));
    println!("  Active sessions: {}", health.active_sessions);
    Ok(())
}

pub async fn session_start(client: &CoraClient) -> Result<()> {
    let session = client.start_session().await?;
    println!("Session started: {}", style(session.session_id).cyan().bold());
    println!(
        "Idle timeout: {} (any activity refreshes it)",
        format_uptime(session.expires_in_secs)
    );
    println!();
    println!("Next step: coractl verify phone {} <mobile>", session.session_id);
    Ok(())
}

pub async fn session_show(client: &CoraClient, id: Uuid) -> Result<()> {
    let snapshot = client.session(id).await?;

    println!("Session {}", style(snapshot.session_id).cyan());
    if let Some(name) = &snapshot.customer_name {
        println!("  Customer:       {}", style(name).bold());
    }
    println!("  Created:        {}", snapshot.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Phone verified: {}", check_mark(snapshot.phone_verified));
    println!("  NRIC verified:  {}", check_mark(snapshot.nric_verified));
    println!("  Authenticated:  {}", check_mark(snapshot.authenticated));
    if snapshot.failed_nric_attempts > 0 {
        println!(
            "  {} failed NRIC attempt(s)",
            style(snapshot.failed_nric_attempts).yellow()
        );
    }
    Ok(())
}

pub async fn session_end(client: &CoraClient, id: Uuid) -> Result<()> {
    client.end_session(id).await?;
    println!("Session {} ended.", id);
    Ok(())
}

pub async fn verify_phone(client: &CoraClient, id: Uuid, mobile: &str) -> Result<()> {
    let response = client.verify_phone(id, mobile).await?;
    print_verify_outcome(&response);
    if response.verified {
        println!("Next step: coractl verify nric {} <last4>", id);
    }
    Ok(())
}

pub async fn verify_nric(client: &CoraClient, id: Uuid, last4: &str) -> Result<()> {
    let response = client.verify_nric(id, last4).await?;
    print_verify_outcome(&response);
    if let Some(remaining) = response.attempts_remaining {
        if !response.verified && remaining > 0 {
            println!("Attempts remaining: {}", style(remaining).yellow());
        }
    }
    if response.authenticated {
        println!("Account access: coractl account {}", id);
    }
    Ok(())
}

pub async fn account(client: &CoraClient, id: Uuid, json: bool) -> Result<()> {
    let account = client.account(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
        return Ok(());
    }

    println!("{}", style(&account.name).bold());
    println!("  Mobile:       {}", account.mobile);
    println!(
        "  Plan:         {} ({}/mo)",
        account.plan.name,
        format_cents(account.plan.monthly_cents)
    );
    println!(
        "  Data:         {:.1} GB of {} GB used",
        account.data_used_mb as f64 / 1024.0,
        account.data_total_mb / 1024
    );
    println!(
        "  Outstanding:  {} (due {})",
        format_cents(account.outstanding_cents),
        account.bill_due_date
    );
    let payment = match account.payment_status {
        PaymentStatus::Paid => style("paid").green(),
        PaymentStatus::Due => style("due").yellow(),
        PaymentStatus::Overdue => style("overdue").red(),
    };
    println!("  Payment:      {}", payment);
    Ok(())
}

pub async fn plans(client: &CoraClient) -> Result<()> {
    let response = client.plans().await?;
    for plan in &response.plans {
        println!(
            "{:<14} {:>9}/mo  {:>4} GB  {:>5} mins  {:>5} SMS",
            style(&plan.name).bold(),
            format_cents(plan.monthly_cents),
            plan.data_gb,
            plan.talktime_mins,
            plan.sms_count
        );
        for perk in &plan.perks {
            println!("               - {}", perk);
        }
    }
    Ok(())
}

pub async fn stores(client: &CoraClient, near: Option<&str>) -> Result<()> {
    let response = client.stores(near).await?;
    if response.stores.is_empty() {
        println!("No stores in that district.");
        return Ok(());
    }
    for store in &response.stores {
        println!("{}", style(&store.name).bold());
        println!("  {} (S{})", store.address, store.postal_code);
        println!("  {}", store.opening_hours);
    }
    Ok(())
}

pub async fn faq(client: &CoraClient, query: &str, limit: usize) -> Result<()> {
    let response = client.search_faq(query, limit).await?;
    if response.hits.is_empty() {
        println!("No FAQ entries matched '{}'.", query);
        return Ok(());
    }
    for hit in &response.hits {
        println!("{}", style(&hit.question).bold());
        println!("  {}", hit.answer);
        println!();
    }
    Ok(())
}

fn print_verify_outcome(response: &VerifyResponse) {
    let marker = if response.verified {
        "✔".green().to_string()
    } else {
        "✘".red().to_string()
    };
    println!("{} {}", marker, response.message);
}

fn check_mark(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

/// Render cents as Singapore dollars
fn format_cents(cents: i64) -> String {
    format!("S${}.{:02}", cents / 100, (cents % 100).abs())
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "S$0.00");
        assert_eq!(format_cents(4250), "S$42.50");
        assert_eq!(format_cents(105), "S$1.05");
        assert_eq!(format_cents(8990), "S$89.90");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(61), "1m 1s");
        assert_eq!(format_uptime(3600), "1h 0m 0s");
        assert_eq!(format_uptime(1800), "30m 0s");
    }
}
