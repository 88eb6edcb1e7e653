/// Development seed data
///
/// Creates two accounts, then two projects owned by the admin with three tasks
/// each, every task assigned to the test user:
///
/// | Email | Password |
/// |---|---|
/// | `admin@example.com` | `Admin@123` |
/// | `test@example.com` | `Test@123` |
///
/// Accounts are reused when a live one with the same email exists. Projects,
/// tasks and assignments are added on every run. Nothing runs in a
/// transaction, so a failure part-way leaves the rows written so far.

use anyhow::Context;
use sqlx::PgPool;
use taskboard_shared::{
    auth::password,
    models::{
        assignment::Assignment,
        project::{CreateProject, Project},
        task::{CreateTask, Task},
        user::{CreateUser, User},
    },
};
use tracing::{debug, info};
use uuid::Uuid;

/// Number of projects created per run
pub const SEED_PROJECTS: usize = 2;

/// Number of tasks created per project
pub const SEED_TASKS_PER_PROJECT: usize = 3;

/// An account created (or reused) by the seeder
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// Owner of the seeded projects and tasks
pub const ADMIN_ACCOUNT: SeedAccount = SeedAccount {
    first_name: "Admin",
    last_name: "User",
    email: "admin@example.com",
    password: "Admin@123",
};

/// Assignee of every seeded task
pub const TEST_ACCOUNT: SeedAccount = SeedAccount {
    first_name: "Test",
    last_name: "User",
    email: "test@example.com",
    password: "Test@123",
};

/// What a seed run wrote
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub admin_id: Uuid,
    pub user_id: Uuid,
    pub project_ids: Vec<Uuid>,
    pub task_ids: Vec<Uuid>,
}

/// Seeds the database
pub async fn run(pool: &PgPool) -> anyhow::Result<SeedSummary> {
    info!("Seeding users, projects and tasks");

    let admin = ensure_account(pool, ADMIN_ACCOUNT).await?;
    let user = ensure_account(pool, TEST_ACCOUNT).await?;

    let mut summary = SeedSummary {
        admin_id: admin.id,
        user_id: user.id,
        project_ids: Vec::with_capacity(SEED_PROJECTS),
        task_ids: Vec::with_capacity(SEED_PROJECTS * SEED_TASKS_PER_PROJECT),
    };

    for i in 1..=SEED_PROJECTS {
        let project = Project::create(
            pool,
            CreateProject {
                title: format!("Project Title {i}"),
                description: format!("Project Description {i}"),
                created_by: admin.id,
            },
        )
        .await
        .with_context(|| format!("creating project {i}"))?;
        summary.project_ids.push(project.id);

        for j in 1..=SEED_TASKS_PER_PROJECT {
            let task = Task::create(
                pool,
                CreateTask {
                    title: format!("Project {i} Task Title {j}"),
                    description: format!("Project {i} Task Description {j}"),
                    project_id: project.id,
                    created_by: admin.id,
                },
            )
            .await
            .with_context(|| format!("creating task {j} of project {i}"))?;

            Assignment::create(pool, user.id, task.id)
                .await
                .with_context(|| format!("assigning task {}", task.id))?;

            debug!(project_id = %project.id, task_id = %task.id, "Seeded task");
            summary.task_ids.push(task.id);
        }
    }

    info!(
        projects = summary.project_ids.len(),
        tasks = summary.task_ids.len(),
        "Seeding finished"
    );

    Ok(summary)
}

async fn ensure_account(pool: &PgPool, account: SeedAccount) -> anyhow::Result<User> {
    if let Some(user) = User::find_active_by_email(pool, account.email).await? {
        debug!(email = account.email, "Seed account already exists");
        return Ok(user);
    }

    let password_hash = password::hash_password(account.password)?;

    let user = User::create(
        pool,
        CreateUser {
            first_name: account.first_name.to_string(),
            last_name: Some(account.last_name.to_string()),
            email: account.email.to_string(),
            password_hash,
        },
    )
    .await
    .with_context(|| format!("creating seed account {}", account.email))?;

    info!(user_id = %user.id, email = account.email, "Created seed account");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_passwords_are_strong() {
        for account in [ADMIN_ACCOUNT, TEST_ACCOUNT] {
            assert!(
                password::validate_password_strength(account.password).is_ok(),
                "{} has a weak password",
                account.email
            );
        }
    }
}
