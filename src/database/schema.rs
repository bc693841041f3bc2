// Table definitions matching `connection::SCHEMA_SQL`.

diesel::table! {
    weights (id) {
        id -> BigInt,
        date -> Date,
        pounds -> Double,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    settings (key) {
        key -> Text,
        value -> Nullable<Text>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(weights, settings,);
