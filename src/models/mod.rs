pub mod black_scholes;
pub mod gbm;
pub mod normal;
pub mod processes;
pub mod taylor;
