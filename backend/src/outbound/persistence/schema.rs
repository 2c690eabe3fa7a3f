//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, regenerate them with `diesel print-schema`.

diesel::table! {
    /// Builder websites, drafts and published alike.
    ///
    /// `slug` carries a `UNIQUE` constraint (`websites_slug_key`) so two
    /// sessions racing for the same slug cannot both persist it.
    websites (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning account.
        owner_id -> Uuid,
        /// Public routing key.
        slug -> Text,
        /// Copy of `content.orgName` for listing without decoding JSON.
        org_name -> Text,
        /// Full builder content as camelCase JSON.
        content -> Jsonb,
        /// Visibility flag.
        is_published -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Best-effort account profile, one row per user.
    user_profiles (user_id) {
        /// Primary key: the identity provider's user id.
        user_id -> Uuid,
        /// Email reported at last sign-in.
        email -> Nullable<Text>,
        /// Display name reported at last sign-in.
        display_name -> Nullable<Text>,
        /// Most recent sign-in.
        last_sign_in_at -> Timestamptz,
    }
}
