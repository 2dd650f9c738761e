//! User report command handler

use crate::state::SharedState;

pub async fn cmd_report(state: &SharedState, status: &str, json: bool) -> anyhow::Result<()> {
    let report = state.user_service.get_user_report_for(status).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Users ({} total, filter: {})",
        report.total_users, report.status_filter
    );
    println!("{:-<70}", "");

    if report.users.is_empty() {
        println!("No users match this filter.");
        return Ok(());
    }

    for user in report.users {
        let indicator = if user.is_active { "●" } else { "○" };
        println!("{} {} <{}>", indicator, user.username, user.email);

        match &user.inactive_since {
            Some(since) => println!("  ID: {} | Inactive since: {}", user.id, since),
            None => println!("  ID: {} | Active", user.id),
        }

        for role in &user.roles {
            println!("    - {} ({})", role.role_name, role.department_name);
        }
    }

    println!();
    println!("Legend: ● Active | ○ Inactive");

    Ok(())
}
