mod helpers;

mod api_test;
mod upload_test;
