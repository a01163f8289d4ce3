pub mod two_factor;
