//! # barcodism
//!
//! Barcode symbol compiler core: turns payload data plus encoding preferences
//! into a symbol's geometry, codewords and an encode-info log, ready for any
//! renderer.
//!
//! ## Features
//!
//! - **Reed-Solomon**: Systematic encoder over any GF(2^m) with a primitive modulus
//! - **Version/size selection**: Smallest size that holds data, metadata and ECC
//! - **GS1**: Bracketed Application Identifier validation and FNC1 reduction
//! - **Structured append**: Splitting oversized payloads across a fixed template
//! - **ECI**: First lossless charset from a caller-ordered candidate list
//! - **Data Matrix ECC200**: Built-in symbology exercising all of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use barcodism::{DataMatrix, SymbolBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = SymbolBuilder::new(DataMatrix::new(), "123456").build()?;
//! assert_eq!(symbol.codewords(), Some(&[142, 164, 186, 114, 25, 5, 88, 102][..]));
//!
//! let img = symbol.render(4); // 4 pixels per module, 1 module quiet zone
//! assert_eq!(img.dimensions(), (48, 48));
//! # Ok(())
//! # }
//! ```
//!
//! ### GS1 data
//!
//! ```rust
//! use barcodism::{DataMatrix, DataType, SymbolBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = SymbolBuilder::new(DataMatrix::new(), "[01]06901236348338[10]batch666");
//! builder.data_type(DataType::Gs1);
//! let symbol = builder.build()?;
//! assert_eq!((symbol.width(), symbol.height()), (18, 18));
//!
//! // The reducer on its own, with a printable FNC1 marker
//! let reduced = barcodism::common::gs1::reduce("[01]06901236348338[10]batch666", "\x1d")?;
//! assert_eq!(reduced, "0106901236348338\x1d10batch666");
//! # Ok(())
//! # }
//! ```
//!
//! ### Structured append
//!
//! ```rust
//! use barcodism::{DataMatrix, SymbolBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = SymbolBuilder::new(DataMatrix::new(), "ABCDE");
//! builder.version(3).message_id(7); // every symbol is 14x14
//! let symbols = builder.build_sequence()?;
//! assert_eq!(symbols.len(), 3);
//! assert!(symbols.iter().all(|s| s.segment().is_some_and(|seg| seg.total == 3)));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;
pub mod symbology;

pub use builder::{Content, SegmentInfo, Shape, Symbol, SymbolBuilder, TextAlign};
pub use common::eci::{Charset, Eci};
pub use common::error::{ErrorKind, Gs1Error, SymbolError, SymbolResult};
pub use common::escape::EscapeMode;
pub use common::metadata::{DataType, EciPolicy, EncodeOptions};
pub use symbology::{DataMatrix, DmShape, SymbolEncoder, Symbology};
