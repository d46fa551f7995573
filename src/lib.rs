pub mod error;

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod models {
    pub mod conversion;
    pub mod encoding;
    pub mod file;
}

pub mod service {
    pub mod config_service;
    pub mod encoding;
    pub mod escape;
    pub mod file;
    pub mod strategy;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod facade {
    pub mod conversion_facade;
    pub mod ports {
        pub mod facade_ports;
    }
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod action {
    pub mod cli;
    pub mod report;
}

pub mod utils {
    pub mod utils;
}
