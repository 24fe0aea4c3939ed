//! Diesel table definitions.

diesel::table! {
    usage_accounts (user_id) {
        user_id -> Uuid,
        plan_tier -> Text,
        calls_used -> Int4,
        calls_limit -> Int4,
        period_end -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    usage_events (id) {
        id -> Int8,
        user_id -> Uuid,
        endpoint -> Text,
        cost_cents -> Int4,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    forms (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Text,
        description -> Text,
        fields -> Jsonb,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    responses (id) {
        id -> Uuid,
        form_id -> Uuid,
        response_data -> Jsonb,
        ip_address -> Text,
        user_agent -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(responses -> forms (form_id));

diesel::allow_tables_to_appear_in_same_query!(usage_accounts, usage_events, forms, responses);
