//! Populate a database with a small demo dataset.
//!
//! Applies pending migrations, then inserts users, templates, badges, cards
//! and social edges in one transaction: the dataset lands whole or not at
//! all. A final unverified user is invited with a fresh token that expires
//! after the configured invitation lifetime. Connection settings come from
//! [`AppSettings`].

use std::time::Duration;

use color_eyre::eyre::{Context, Result, eyre};
use diesel_async::scoped_futures::ScopedFutureExt;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use grace::domain::ports::{StoreError, UserRepository};
use grace::domain::{
    Badge, Card, Follower, Friend, Notification, Password, Template, User, UserBadge,
};
use grace::outbound::persistence::{
    DbPool, DieselUserRepository, insert_badge, insert_card, insert_follower, insert_friend, insert_notification,
    insert_template, insert_user, insert_user_badge, run_migrations, with_transaction,
};
use grace::settings::AppSettings;
use ortho_config::OrthoConfig;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "grateful-demo";
const INVITEE: &str = "hopper";

/// Rows inserted by the seed, before ids are assigned.
struct DemoDataset {
    users: Vec<User>,
    templates: Vec<Template>,
    badges: Vec<Badge>,
}

/// Counts reported once the transaction commits.
#[derive(Debug, Default)]
struct SeedSummary {
    users: usize,
    templates: usize,
    badges: usize,
    cards: usize,
    friendships: usize,
    follows: usize,
}

fn demo_dataset(password: &Password) -> DemoDataset {
    let users = ["ada", "grace", "linus"]
        .into_iter()
        .map(|name| {
            let mut user = User::new(name, format!("{name}@example.com"), password.clone());
            user.verified = true;
            user
        })
        .collect();

    let templates = vec![
        Template::new(
            "Thank you",
            "A plain note of thanks",
            json!({ "background": "#fff8e7", "font": "serif" }),
        ),
        Template::new(
            "Well done",
            "Celebrate a win",
            json!({ "background": "#e7f7ff", "font": "sans" }),
        ),
    ];

    let badges = vec![
        Badge::new("First card", "Sent a first card", "star"),
        Badge::new("Good friend", "Made a first friend", "heart"),
    ];

    DemoDataset {
        users,
        templates,
        badges,
    }
}

/// Unverified user awaiting activation through an invitation.
fn invitee(password: &Password) -> User {
    User::new(INVITEE, format!("{INVITEE}@example.com"), password.clone())
}

/// Invite [`invitee`] and return the stored user with its plaintext token.
async fn invite(
    pool: &DbPool,
    password: &Password,
    ttl: Duration,
) -> Result<(User, String), StoreError> {
    let users = DieselUserRepository::new(pool.clone());
    let mut user = invitee(password);
    let token = Uuid::new_v4().simple().to_string();
    users.create_and_invite(&mut user, &token, ttl).await?;
    Ok((user, token))
}

async fn seed(pool: &DbPool, dataset: DemoDataset) -> Result<SeedSummary, StoreError> {
    with_transaction(pool, "seed.demo_dataset", |conn| {
        async move {
            let DemoDataset {
                mut users,
                mut templates,
                mut badges,
            } = dataset;
            let mut summary = SeedSummary::default();

            for user in &mut users {
                insert_user(conn, user).await?;
            }
            summary.users = users.len();

            for template in &mut templates {
                insert_template(conn, template).await?;
            }
            summary.templates = templates.len();

            for badge in &mut badges {
                insert_badge(conn, badge).await?;
            }
            summary.badges = badges.len();

            // Every user sends one card to the next, which raises a notification.
            let first_badge = badges.first().map(|badge| badge.id);
            let recipients = users.iter().cycle().skip(1);
            for ((sender, recipient), template) in users
                .iter()
                .zip(recipients)
                .zip(templates.iter().cycle())
            {
                let mut card = Card::new(
                    format!("Thanks, {}", recipient.username),
                    json!({ "from": sender.username, "message": "Grateful for you." }),
                    template.id,
                    sender.id,
                );
                insert_card(conn, &mut card).await?;
                let mut notification = Notification::new(card.id, recipient.id);
                insert_notification(conn, &mut notification).await?;
                summary.cards += 1;

                if let Some(badge_id) = first_badge {
                    let mut award = UserBadge::new(sender.id, badge_id);
                    insert_user_badge(conn, &mut award).await?;
                }
            }

            // Friendships are stored in both directions.
            for pair in users.windows(2) {
                let [left, right] = pair else {
                    continue;
                };
                let (left, right) = (left.id, right.id);
                let forward = Friend {
                    user_id: left,
                    friend_id: right,
                };
                let backward = Friend {
                    user_id: right,
                    friend_id: left,
                };
                insert_friend(conn, &forward).await?;
                insert_friend(conn, &backward).await?;
                summary.friendships += 1;
            }

            if let Some((followed, others)) = users.split_first() {
                for follower in others {
                    let edge = Follower {
                        user_id: followed.id,
                        follower_id: follower.id,
                    };
                    insert_follower(conn, &edge).await?;
                    summary.follows += 1;
                }
            }

            Ok(summary)
        }
        .scope_boxed()
    })
    .await
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let database_url = settings.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;
    info!(applied, "migrations up to date");

    let pool = DbPool::new(settings.pool_config())
        .await
        .wrap_err("failed to build database pool")?;

    let password =
        Password::from_plaintext(DEMO_PASSWORD).wrap_err("failed to hash demo password")?;
    let summary = seed(&pool, demo_dataset(&password))
        .await
        .wrap_err("failed to insert demo dataset")?;

    info!(
        users = summary.users,
        templates = summary.templates,
        badges = summary.badges,
        cards = summary.cards,
        friendships = summary.friendships,
        follows = summary.follows,
        "demo dataset seeded"
    );

    let ttl = settings.invitation_ttl();
    let (invited, token) = invite(&pool, &password, ttl)
        .await
        .wrap_err("failed to invite demo user")?;
    info!(
        user_id = invited.id,
        username = %invited.username,
        token = %token,
        ttl_secs = ttl.as_secs(),
        "pending invitation created"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rstest::rstest;

    #[rstest]
    fn demo_users_have_distinct_keys() {
        let dataset = demo_dataset(&Password::from_hash("$argon2id$stub"));

        let usernames: HashSet<_> = dataset.users.iter().map(|u| u.username.as_str()).collect();
        let emails: HashSet<_> = dataset.users.iter().map(|u| u.email.as_str()).collect();

        assert_eq!(usernames.len(), dataset.users.len());
        assert_eq!(emails.len(), dataset.users.len());
        assert!(dataset.users.iter().all(|u| u.verified && u.id == 0));
    }

    #[rstest]
    fn invitee_is_unverified_and_outside_the_dataset() {
        let password = Password::default();
        let dataset = demo_dataset(&password);
        let user = invitee(&password);

        assert!(!user.verified);
        assert!(dataset.users.iter().all(|u| u.username != user.username));
        assert!(dataset.users.iter().all(|u| u.email != user.email));
    }

    #[rstest]
    fn demo_dataset_has_templates_and_badges() {
        let dataset = demo_dataset(&Password::default());
        assert!(!dataset.templates.is_empty());
        assert!(!dataset.badges.is_empty());
    }
}
