pub mod evaluator;
pub mod function;
pub mod painters;
