//! Diesel schema for the task row-store.

diesel::table! {
    /// Task rows shown on the board.
    tasks (id) {
        /// Row identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Group label.
        #[max_length = 15]
        label -> Varchar,
        /// Display period, `YYYY-MM-DD - YYYY-MM-DD`.
        #[max_length = 32]
        period -> Varchar,
        /// 1-based rank within the group.
        position -> Nullable<Int4>,
        /// Owning identity.
        #[max_length = 255]
        user_id -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
