//! QR Code symbol encoding for versions 1 to 6 in byte mode.
//!
//! The caller chooses the complete setup of the symbol, see [SymbolSpec].
//! No version or mask selection is done.
//!
//! ```rust
//! use qrmatrix::{EcLevel, MaskPattern, SymbolSpec, Version};
//!
//! let spec = SymbolSpec::new(
//!     Version::V1,
//!     EcLevel::Medium,
//!     MaskPattern::new(2).unwrap(),
//!     [(16, 1)],
//!     10,
//! )
//! .unwrap();
//! let symbol = qrmatrix::encode(b"Hello, world!", &spec).unwrap();
//! assert_eq!(symbol.width(), 21);
//! ```
mod encodation;
mod error;
mod format;
mod mask;
mod symbol_spec;

pub mod data;
pub mod errorcode;
pub mod grid;
pub mod patterns;
pub mod placement;

pub use error::{EncodeError, ErrorKind};
pub use format::FormatInfo;
pub use grid::{Module, ModuleGrid, Symbol};
pub use mask::MaskPattern;
pub use patterns::Pattern;
pub use symbol_spec::{BlockLayout, EcLevel, SymbolSpec, Version};

use log::debug;

/// Encode the data as a QR Code symbol.
///
/// The data is encoded in byte mode and must fit into the data capacity
/// of `spec`. [SymbolSpec::new] already made sure the codewords fit into
/// the symbol. Modules not reached by the bit stream are set to dark before
/// masking.
pub fn encode(data: &[u8], spec: &SymbolSpec) -> Result<Symbol, EncodeError> {
    debug!(
        "encoding {} bytes as version {} level {} mask {}",
        data.len(),
        spec.version().number(),
        spec.ec_level(),
        spec.mask().id()
    );
    let format = FormatInfo::new(spec.ec_level(), spec.mask());
    let mut symbol = patterns::function_patterns(spec.version(), &format)?;

    let codewords = data::encode_data(data, spec.data_capacity())?;
    let stream = errorcode::interleave(&codewords, spec.blocks(), spec.ec_codewords())?;

    let layer = placement::place_stream(&symbol, &stream)?;
    let layer = placement::fill_vacancies(&symbol, layer)?;
    let layer = mask::apply(layer, spec.mask());
    symbol.merge(&layer, false)?;
    symbol.into_symbol()
}
