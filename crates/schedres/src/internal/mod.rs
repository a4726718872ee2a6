pub mod common;

#[cfg(test)]
mod tests;
