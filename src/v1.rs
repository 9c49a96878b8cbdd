pub mod wish;
