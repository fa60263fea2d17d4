pub mod consts;
pub mod crm;
pub mod model;
pub mod relay;
