//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in step with the SQL by hand or with `diesel print-schema`.

diesel::table! {
    /// Registered accounts. `username` and `email` carry the
    /// `users_username_key` and `users_email_key` unique constraints.
    users (id) {
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string.
        password -> Text,
        verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pending invitations keyed by the SHA-256 digest of the plain token.
    user_invitations (token) {
        token -> Varchar,
        user_id -> Int8,
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    user_tokens (id) {
        id -> Int8,
        token -> Text,
        user_id -> Int8,
    }
}

diesel::table! {
    templates (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        data -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    cards (id) {
        id -> Int8,
        title -> Varchar,
        data -> Jsonb,
        template_id -> Int8,
        user_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    badges (id) {
        id -> Int8,
        title -> Varchar,
        description -> Text,
        icon -> Varchar,
    }
}

diesel::table! {
    user_badges (user_id, badge_id) {
        user_id -> Int8,
        badge_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed edge: `user_id` befriended `friend_id`.
    friends (user_id, friend_id) {
        user_id -> Int8,
        friend_id -> Int8,
    }
}

diesel::table! {
    /// Directed edge: `follower_id` follows `user_id`.
    followers (user_id, follower_id) {
        user_id -> Int8,
        follower_id -> Int8,
    }
}

diesel::table! {
    notifications (card_id, user_id) {
        card_id -> Int8,
        user_id -> Int8,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(cards -> templates (template_id));
diesel::joinable!(user_badges -> badges (badge_id));
diesel::joinable!(user_invitations -> users (user_id));
diesel::joinable!(user_tokens -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    badges,
    cards,
    followers,
    friends,
    notifications,
    templates,
    user_badges,
    user_invitations,
    user_tokens,
    users,
);
