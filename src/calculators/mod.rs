// Calculator modules - one per operational improvement initiative

pub mod avatar;
pub mod bed_turnover;
pub mod ed_boarding;
pub mod nurse_time;
