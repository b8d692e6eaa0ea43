//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional task description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Status code: 0 not started, 1 in progress, 2 completed.
        status -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
    }
}
