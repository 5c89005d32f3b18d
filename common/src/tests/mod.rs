mod error_location;
mod http_status;
mod session_token;
