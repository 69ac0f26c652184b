pub mod clipboard;
pub mod logging;
pub mod notify;
#[cfg(test)]
pub mod test_utils;
pub mod url;
