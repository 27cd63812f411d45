pub mod adapter;
pub mod error;
pub mod executor;
pub mod memory;

pub mod metadata {
    pub mod column;
    pub mod table;
}

pub mod sql {
    pub mod base {
        pub mod query {
            pub mod generator;
        }
    }

    pub mod mysql {
        pub mod executor;
        pub mod params;
        pub mod row;
    }

    pub mod postgres {
        pub mod executor;
        pub mod params;
        pub mod row;
        pub mod utils;
    }
}
