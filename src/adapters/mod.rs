// Adapters layer: concrete implementations for external systems (http services, terminal input, map view).

pub mod http;
pub mod india_post;
pub mod nominatim;
pub mod photon;
pub mod selector;
pub mod view;
