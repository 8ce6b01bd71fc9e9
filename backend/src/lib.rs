pub mod encoding;
pub mod fft;
pub mod gauss_int;
pub mod module;
pub mod poly;
pub mod poly_ops;
pub mod sampling;

pub use encoding::*;
pub use fft::*;
pub use gauss_int::*;
pub use module::*;
pub use poly::*;
pub use poly_ops::*;
pub use self::sampling::*;

pub use rug::Integer;
