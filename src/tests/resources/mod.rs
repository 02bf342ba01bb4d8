mod gateway_tests;
mod run_tests;
