//! Request and response bodies for the HTTP surface

pub mod two_factor;

pub use two_factor::{
    CodeStatusRequest, CodeStatusResponse, SendCodeRequest, SendCodeResponse,
    VerifyCodeRequest, VerifyCodeResponse,
};
