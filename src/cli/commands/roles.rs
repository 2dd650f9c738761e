//! List roles command handler

use crate::state::SharedState;

pub async fn cmd_list_roles(state: &SharedState) -> anyhow::Result<()> {
    let roles = state.role_service.list_roles().await?;

    if roles.is_empty() {
        println!("No roles defined.");
        println!();
        println!("Create one with: POST /roles {{\"role_name\": ..., \"department_name\": ...}}");
        return Ok(());
    }

    println!("Roles ({} total)", roles.len());
    println!("{:-<70}", "");

    for role in roles {
        println!(
            "  [{}] {} | Department: {}",
            role.role_id, role.role_name, role.department_name
        );
    }

    Ok(())
}
