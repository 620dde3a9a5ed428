pub mod registration_compare;
pub mod volume_compare;
