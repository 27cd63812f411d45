pub mod core {
    pub mod column;
    pub mod data_type;
    pub mod value;
}

pub mod pagination {
    pub mod cursor;
    pub mod page;
}

pub mod records {
    pub mod row;
}
