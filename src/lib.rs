pub use sumac_analysis as analysis;
pub use sumac_ir as ir;

pub mod prelude {
    pub use sumac_analysis::*;
    pub use sumac_ir::*;
}
