//! REST API endpoint tests

mod todo_tests;
