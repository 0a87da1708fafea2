pub mod application {
    pub mod product {
        pub mod add;
        pub mod edit;
        pub mod get_by_id;
        pub mod list;
        pub mod remove;
        pub mod search;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add;
            pub mod edit;
            pub mod get_by_id;
            pub mod list;
            pub mod remove;
            pub mod search;
        }
    }
}
