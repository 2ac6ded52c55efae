pub mod application {
    pub mod invoice {
        pub mod create;
        pub mod delete;
        pub mod get_by_id;
        pub mod list;
        pub mod update;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod context;
        pub mod pagination;
    }
    pub mod invoice {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod validation;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod get_by_id;
            pub mod list;
            pub mod update;
        }
    }
}
