pub mod application {
    pub mod cart {
        pub mod repository;
        pub mod store;
    }
    pub mod product {
        pub mod get_all;
        pub mod get_by_id;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod storage;
    pub mod cart {
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add_to_cart;
            pub mod clear_cart;
            pub mod remove_from_cart;
            pub mod update_quantity;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_all;
            pub mod get_by_id;
        }
    }
}
