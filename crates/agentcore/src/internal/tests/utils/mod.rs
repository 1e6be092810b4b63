pub mod push;
pub mod resources;

#[allow(unused)]
pub fn enable_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn expect_error_message<T: std::fmt::Debug>(result: crate::Result<T>, msg: &str) {
    match result {
        Ok(value) => panic!("Expected error, got Ok({value:?})"),
        Err(error) => {
            let formatted = format!("{error}");
            if !formatted.contains(msg) {
                panic!("Did not find `{msg}` in `{formatted}`");
            }
        }
    }
}
