//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Dish categories. Owned by the category admin; read here for names only.
    category (id) {
        id -> Int8,
        name -> Varchar,
        sort -> Int4,
        status -> Int4,
        create_time -> Timestamptz,
        update_time -> Timestamptz,
    }
}

diesel::table! {
    /// Dishes. `name` is unique through the `dish_name_key` constraint.
    dish (id) {
        id -> Int8,
        name -> Varchar,
        category_id -> Int8,
        /// Price in minor currency units.
        price -> Int8,
        image -> Nullable<Varchar>,
        description -> Nullable<Varchar>,
        /// `1` on sale, `0` off the menu.
        status -> Int4,
        create_time -> Timestamptz,
        update_time -> Timestamptz,
    }
}

diesel::table! {
    /// Flavour options; removed together with their dish.
    dish_flavor (id) {
        id -> Int8,
        dish_id -> Int8,
        name -> Varchar,
        value -> Varchar,
    }
}

diesel::table! {
    /// Set meal membership. A row here blocks deletion of the dish.
    setmeal_dish (id) {
        id -> Int8,
        setmeal_id -> Int8,
        dish_id -> Int8,
        name -> Varchar,
        price -> Int8,
        copies -> Int4,
    }
}

diesel::joinable!(dish -> category (category_id));
diesel::joinable!(dish_flavor -> dish (dish_id));
diesel::joinable!(setmeal_dish -> dish (dish_id));

diesel::allow_tables_to_appear_in_same_query!(category, dish, dish_flavor, setmeal_dish);
