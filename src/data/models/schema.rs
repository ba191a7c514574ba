diesel::table! {
    brands (id) {
        id -> Text,
        name -> Text,
        logo -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    categories (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    products (id) {
        id -> Text,
        name -> Text,
        category_id -> Nullable<Text>,
        price -> Numeric,
        images -> Array<Text>,
        description -> Text,
        specifications -> Jsonb,
        care -> Text,
        stock_status -> Text,
        status -> Text,
        color -> Text,
        material -> Text,
        options -> Jsonb,
        redirect_link -> Nullable<Text>,
        is_featured -> Bool,
        is_new -> Bool,
        popularity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Text,
        creator -> Jsonb,
        video_url -> Text,
        thumbnail -> Text,
        overlay_text -> Text,
        review_text -> Text,
        related_product_ids -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(products -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(brands, categories, products, reviews,);
