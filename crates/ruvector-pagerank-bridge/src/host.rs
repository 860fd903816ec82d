//! Host array descriptors.
//!
//! A host numeric environment hands the bridge typed, shape-tagged arrays.
//! [`HostArray`] is a read-only view over one of them: an element class, a
//! dimension list, and a borrowed slice of the host's storage. Nothing in the
//! bridge ever mutates the storage behind a view.
//!
//! [`HostValue`] is the owned counterpart. It is what the bridge hands back
//! as output, and what the CLI deserialises call files into. Its JSON form is
//! internally tagged:
//!
//! ```json
//! { "class": "int32", "dims": [4, 1], "data": [0, 1, 2, 3] }
//! { "class": "double", "dims": [1, 1], "real": [0.85] }
//! { "class": "char", "dims": [1, 5], "data": "power" }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::HostShapeError;

// ---------------------------------------------------------------------------
// Element class
// ---------------------------------------------------------------------------

/// Element type tag of a host array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementClass {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// IEEE double, optionally with an imaginary part.
    Double,
    /// UTF-16 code units.
    Char,
}

impl ElementClass {
    /// Either integer width.
    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }
}

impl std::fmt::Display for ElementClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementClass::Int32 => write!(f, "int32"),
            ElementClass::Int64 => write!(f, "int64"),
            ElementClass::Double => write!(f, "double"),
            ElementClass::Char => write!(f, "char"),
        }
    }
}

// ---------------------------------------------------------------------------
// Borrowed view
// ---------------------------------------------------------------------------

/// Typed read-only view of host storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostData<'a> {
    /// `int32` elements.
    Int32(&'a [i32]),
    /// `int64` elements.
    Int64(&'a [i64]),
    /// `double` elements; `imag` is present for complex arrays.
    Double {
        /// Real parts.
        real: &'a [f64],
        /// Imaginary parts, same length as `real`.
        imag: Option<&'a [f64]>,
    },
    /// Character data as UTF-16 code units.
    Char(&'a [u16]),
}

impl<'a> HostData<'a> {
    /// Element class of this storage.
    pub fn class(&self) -> ElementClass {
        match self {
            HostData::Int32(_) => ElementClass::Int32,
            HostData::Int64(_) => ElementClass::Int64,
            HostData::Double { .. } => ElementClass::Double,
            HostData::Char(_) => ElementClass::Char,
        }
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            HostData::Int32(d) => d.len(),
            HostData::Int64(d) => d.len(),
            HostData::Double { real, .. } => real.len(),
            HostData::Char(d) => d.len(),
        }
    }

    /// `true` when no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only descriptor of one host array argument.
///
/// The element count is always the product of the dimensions; constructors
/// refuse descriptors whose storage disagrees with their shape.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray<'a> {
    dims: Cow<'a, [usize]>,
    data: HostData<'a>,
}

impl<'a> HostArray<'a> {
    /// Describe `data` with an explicit shape.
    ///
    /// # Errors
    ///
    /// Returns [`HostShapeError`] when the product of `dims` overflows or
    /// differs from the number of stored elements, or when a complex array's
    /// imaginary part has a different length from its real part.
    pub fn new(
        dims: impl Into<Cow<'a, [usize]>>,
        data: HostData<'a>,
    ) -> Result<Self, HostShapeError> {
        let dims = dims.into();
        let count = if dims.contains(&0) {
            Some(0)
        } else {
            dims.iter().try_fold(1usize, |n, &d| n.checked_mul(d))
        };
        let Some(expected) = count else {
            return Err(HostShapeError::Overflow {
                dims: dims.into_owned(),
            });
        };
        if expected != data.len() {
            return Err(HostShapeError::Mismatch {
                dims: dims.into_owned(),
                expected,
                actual: data.len(),
            });
        }
        if let HostData::Double {
            real,
            imag: Some(imag),
        } = data
        {
            if imag.len() != real.len() {
                return Err(HostShapeError::Mismatch {
                    dims: dims.into_owned(),
                    expected,
                    actual: imag.len(),
                });
            }
        }
        Ok(Self { dims, data })
    }

    /// `n x 1` column over `data`.
    pub fn column(data: HostData<'a>) -> Self {
        Self {
            dims: Cow::Owned(vec![data.len(), 1]),
            data,
        }
    }

    /// `1 x n` row over `data`.
    pub fn row(data: HostData<'a>) -> Self {
        Self {
            dims: Cow::Owned(vec![1, data.len()]),
            data,
        }
    }

    /// `1 x 1` int32 scalar.
    pub fn int32_scalar(value: &'a i32) -> Self {
        Self::column(HostData::Int32(std::slice::from_ref(value)))
    }

    /// `1 x 1` int64 scalar.
    pub fn int64_scalar(value: &'a i64) -> Self {
        Self::column(HostData::Int64(std::slice::from_ref(value)))
    }

    /// `1 x 1` real double scalar.
    pub fn double_scalar(value: &'a f64) -> Self {
        Self::column(HostData::Double {
            real: std::slice::from_ref(value),
            imag: None,
        })
    }

    /// `n x 1` real double column.
    pub fn double_column(values: &'a [f64]) -> Self {
        Self::column(HostData::Double {
            real: values,
            imag: None,
        })
    }

    /// `0 x 0` real double array, the host's "empty" placeholder.
    pub fn empty_double() -> Self {
        Self {
            dims: Cow::Owned(vec![0, 0]),
            data: HostData::Double {
                real: &[],
                imag: None,
            },
        }
    }

    /// Element class tag.
    #[inline]
    pub fn class(&self) -> ElementClass {
        self.data.class()
    }

    /// Per-dimension extents.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// `true` for double arrays carrying an imaginary part.
    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self.data, HostData::Double { imag: Some(_), .. })
    }

    /// Typed view of the storage.
    #[inline]
    pub fn data(&self) -> HostData<'a> {
        self.data
    }
}

// ---------------------------------------------------------------------------
// Owned value
// ---------------------------------------------------------------------------

/// Owned host array, used for outputs and serialised call files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum HostValue {
    /// `int32` array.
    Int32 {
        /// Extents.
        dims: Vec<usize>,
        /// Column-major elements.
        data: Vec<i32>,
    },
    /// `int64` array.
    Int64 {
        /// Extents.
        dims: Vec<usize>,
        /// Column-major elements.
        data: Vec<i64>,
    },
    /// `double` array, complex when `imag` is present.
    Double {
        /// Extents.
        dims: Vec<usize>,
        /// Real parts.
        real: Vec<f64>,
        /// Imaginary parts.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        imag: Option<Vec<f64>>,
    },
    /// Character array, stored as UTF-16 and serialised as a string.
    Char {
        /// Extents.
        dims: Vec<usize>,
        /// UTF-16 code units.
        #[serde(with = "utf16_text")]
        data: Vec<u16>,
    },
}

impl HostValue {
    /// `1 x 1` int32.
    pub fn int32_scalar(value: i32) -> Self {
        HostValue::Int32 {
            dims: vec![1, 1],
            data: vec![value],
        }
    }

    /// `1 x 1` int64.
    pub fn int64_scalar(value: i64) -> Self {
        HostValue::Int64 {
            dims: vec![1, 1],
            data: vec![value],
        }
    }

    /// `n x 1` int32 column.
    pub fn int32_column(data: Vec<i32>) -> Self {
        HostValue::Int32 {
            dims: vec![data.len(), 1],
            data,
        }
    }

    /// `n x 1` int64 column.
    pub fn int64_column(data: Vec<i64>) -> Self {
        HostValue::Int64 {
            dims: vec![data.len(), 1],
            data,
        }
    }

    /// `1 x 1` real double.
    pub fn double_scalar(value: f64) -> Self {
        HostValue::Double {
            dims: vec![1, 1],
            real: vec![value],
            imag: None,
        }
    }

    /// `n x 1` real double column.
    pub fn double_column(real: Vec<f64>) -> Self {
        HostValue::Double {
            dims: vec![real.len(), 1],
            real,
            imag: None,
        }
    }

    /// `0 x 0` real double.
    pub fn empty_double() -> Self {
        HostValue::Double {
            dims: vec![0, 0],
            real: Vec::new(),
            imag: None,
        }
    }

    /// `1 x n` character row holding `text`.
    pub fn string(text: &str) -> Self {
        let data: Vec<u16> = text.encode_utf16().collect();
        HostValue::Char {
            dims: vec![1, data.len()],
            data,
        }
    }

    /// Extents.
    pub fn dims(&self) -> &[usize] {
        match self {
            HostValue::Int32 { dims, .. }
            | HostValue::Int64 { dims, .. }
            | HostValue::Double { dims, .. }
            | HostValue::Char { dims, .. } => dims,
        }
    }

    /// Real parts of a double array, `None` for other classes.
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            HostValue::Double { real, .. } => Some(real),
            _ => None,
        }
    }

    /// Borrow this value as a [`HostArray`].
    ///
    /// # Errors
    ///
    /// Returns [`HostShapeError`] if `dims` does not describe the stored data.
    pub fn view(&self) -> Result<HostArray<'_>, HostShapeError> {
        let data = match self {
            HostValue::Int32 { data, .. } => HostData::Int32(data),
            HostValue::Int64 { data, .. } => HostData::Int64(data),
            HostValue::Double { real, imag, .. } => HostData::Double {
                real,
                imag: imag.as_deref(),
            },
            HostValue::Char { data, .. } => HostData::Char(data),
        };
        HostArray::new(self.dims(), data)
    }
}

mod utf16_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(units: &[u16], s: S) -> Result<S::Ok, S::Error> {
        let text = String::from_utf16(units).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u16>, D::Error> {
        let text = String::deserialize(d)?;
        Ok(text.encode_utf16().collect())
    }
}
