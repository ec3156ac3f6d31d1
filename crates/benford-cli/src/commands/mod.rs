pub mod benford;
