pub mod infer;
pub mod normalize;
