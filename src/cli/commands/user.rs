use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::db::log::audit_best_effort;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, Role, UserUpdate};
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        UserAction::Add {
            username,
            role,
            cedula,
            area,
        } => {
            let new = NewUser {
                username: username.clone(),
                role: Role::parse(role)?,
                cedula: cedula.clone().filter(|c| !c.trim().is_empty()),
                area: area.clone().filter(|a| !a.trim().is_empty()),
            };
            let user = users::insert_user(&pool.conn, &new)?;

            audit_best_effort(
                &pool.conn,
                "user_add",
                &user.username,
                &format!("Registered {} ({})", user.username, user.role),
            );
            success(format!("User registered: {} (id {})", user.username, user.id));
            println!("QR: {}", user.qr_code_data);
        }

        UserAction::List => {
            let list = users::list_users(&pool.conn)?;
            if list.is_empty() {
                info("No users registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("id"),
                Column::left("username"),
                Column::left("role"),
                Column::left("cedula"),
                Column::left("area"),
            ]);
            for u in &list {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.role.to_string(),
                    or_dash(u.cedula.as_deref()).to_string(),
                    or_dash(u.area.as_deref()).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::Update {
            id,
            username,
            role,
            cedula,
            area,
        } => {
            let upd = UserUpdate {
                username: username.clone(),
                role: role.as_deref().map(Role::parse).transpose()?,
                cedula: cedula.clone(),
                area: area.clone(),
            };
            if upd.is_empty() {
                return Err(AppError::Other(
                    "nothing to update: pass --username, --role, --cedula or --area".into(),
                ));
            }

            let user = users::update_user(&pool.conn, *id, &upd)?;
            audit_best_effort(
                &pool.conn,
                "user_update",
                &user.username,
                &format!("Updated user {}", user.id),
            );
            success(format!("User updated: {} (id {})", user.username, user.id));
        }

        UserAction::Del { id } => {
            let removed = users::delete_user(&mut pool.conn, *id)?;
            audit_best_effort(
                &pool.conn,
                "user_del",
                &id.to_string(),
                &format!("Deleted user {id} and {removed} events"),
            );
            success(format!("User {id} deleted ({removed} events removed)"));
        }

        UserAction::Qr { username } => {
            let user = users::find_by_username(&pool.conn, username)?
                .ok_or_else(|| AppError::UserNotFound(username.clone()))?;
            println!("{}", user.qr_code_data);
        }
    }

    Ok(())
}
