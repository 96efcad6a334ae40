//! Struct layout equivalence checking.
//!
//! A host record (a Rust `#[repr(C)]` struct) and its native counterpart (the
//! C struct as written in the header) are described as [`RecordLayout`]s and
//! compared field by field with [`check_pair`]. The host side is measured by
//! the compiler via [`host_layout!`](crate::host_layout); the native side is
//! computed from a [`NativeRecord`] description with the C layout rules of the
//! current target.

use core::mem::{align_of, size_of};
use std::collections::BTreeMap;

use thiserror::Error;

/// Coarse type category used when comparing fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Int,
    Float,
    /// Raw pointers and pointer-sized addresses.
    Pointer,
    Array,
    Record,
}

impl FieldKind {
    pub const fn is_pointer_like(self) -> bool {
        matches!(self, FieldKind::Pointer)
    }
}

/// Types that may appear as a field of a host record.
pub trait AbiField {
    const KIND: FieldKind;
}

macro_rules! abi_field {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl AbiField for $ty {
                const KIND: FieldKind = FieldKind::$kind;
            }
        )*
    };
}

abi_field!(Int: u8, i8, u16, i16, u32, i32, u64, i64);
abi_field!(Float: f32, f64);
abi_field!(Pointer: usize, isize);

impl<T: ?Sized> AbiField for *mut T {
    const KIND: FieldKind = FieldKind::Pointer;
}

impl<T: ?Sized> AbiField for *const T {
    const KIND: FieldKind = FieldKind::Pointer;
}

impl<T, const N: usize> AbiField for [T; N] {
    const KIND: FieldKind = FieldKind::Array;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
    pub kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: Vec<FieldLayout>,
}

#[doc(hidden)]
pub fn field_size<R, F, P>(_project: P) -> usize
where
    P: Fn(&R) -> &F,
{
    size_of::<F>()
}

#[doc(hidden)]
pub fn field_kind<R, F, P>(_project: P) -> FieldKind
where
    F: AbiField,
    P: Fn(&R) -> &F,
{
    F::KIND
}

/// Measures a host record: `host_layout!(KeyboardEvent { type_, timestamp, .. })`.
///
/// Every listed field must implement [`AbiField`].
#[macro_export]
macro_rules! host_layout {
    ($record:ident { $($field:ident),* $(,)? }) => {
        $crate::layout::RecordLayout {
            name: ::core::stringify!($record),
            size: ::core::mem::size_of::<$record>(),
            align: ::core::mem::align_of::<$record>(),
            fields: ::std::vec![
                $(
                    $crate::layout::FieldLayout {
                        name: ::core::stringify!($field),
                        offset: ::core::mem::offset_of!($record, $field),
                        size: $crate::layout::field_size(|record: &$record| &record.$field),
                        kind: $crate::layout::field_kind(|record: &$record| &record.$field),
                    }
                ),*
            ],
        }
    };
}

/// A C field type as spelled in a header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// Any object or function pointer.
    Ptr,
    /// `uintptr_t`.
    UintPtr,
    /// A C enum; `int` sized on every supported target.
    Enum,
    Array(Box<CType>, usize),
    Record {
        name: &'static str,
        size: usize,
        align: usize,
    },
}

impl CType {
    pub fn array(elem: CType, len: usize) -> Self {
        CType::Array(Box::new(elem), len)
    }

    /// Embeds an already computed native layout as a nested struct.
    pub fn record(layout: &RecordLayout) -> Self {
        CType::Record {
            name: layout.name,
            size: layout.size,
            align: layout.align,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            CType::U8 | CType::I8 => 1,
            CType::U16 | CType::I16 => 2,
            CType::U32 | CType::I32 | CType::F32 | CType::Enum => 4,
            CType::U64 | CType::I64 | CType::F64 => 8,
            CType::Ptr | CType::UintPtr => size_of::<*const ()>(),
            CType::Array(elem, len) => elem.size() * len,
            CType::Record { size, .. } => *size,
        }
    }

    pub fn align(&self) -> usize {
        match self {
            CType::U8 | CType::I8 => 1,
            CType::U16 | CType::I16 => 2,
            CType::U32 | CType::I32 | CType::F32 | CType::Enum => 4,
            CType::U64 | CType::I64 => align_of::<i64>(),
            CType::F64 => align_of::<f64>(),
            CType::Ptr | CType::UintPtr => align_of::<*const ()>(),
            CType::Array(elem, _) => elem.align(),
            CType::Record { align, .. } => *align,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            CType::F32 | CType::F64 => FieldKind::Float,
            CType::Ptr | CType::UintPtr => FieldKind::Pointer,
            CType::Array(..) => FieldKind::Array,
            CType::Record { .. } => FieldKind::Record,
            _ => FieldKind::Int,
        }
    }
}

/// Builder for the native side of a pair.
#[derive(Clone, Debug)]
pub struct NativeRecord {
    name: &'static str,
    fields: Vec<(&'static str, CType)>,
}

impl NativeRecord {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &'static str, ty: CType) -> Self {
        self.fields.push((name, ty));
        self
    }

    /// Lays the fields out in order: each at the next multiple of its
    /// alignment, the total rounded up to the largest alignment.
    pub fn layout(&self) -> RecordLayout {
        let mut offset = 0;
        let mut align = 1;
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, ty) in &self.fields {
            offset = align_up(offset, ty.align());
            align = align.max(ty.align());
            fields.push(FieldLayout {
                name: *name,
                offset,
                size: ty.size(),
                kind: ty.kind(),
            });
            offset += ty.size();
        }
        RecordLayout {
            name: self.name,
            size: align_up(offset, align),
            align,
            fields,
        }
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutMismatch {
    #[error("{host} is {host_size} bytes but {native} is {native_size} bytes")]
    Size {
        host: &'static str,
        native: &'static str,
        host_size: usize,
        native_size: usize,
    },
    #[error("{host} has fields {host_fields:?} but {native} has {native_fields:?}")]
    FieldCount {
        host: &'static str,
        native: &'static str,
        host_fields: Vec<String>,
        native_fields: Vec<String>,
    },
    #[error("{host}.{field} has no counterpart in {native}")]
    MissingField {
        host: &'static str,
        native: &'static str,
        field: &'static str,
    },
    #[error("{host}.{field} is at offset {host_offset} but at {native_offset} in {native}")]
    Offset {
        host: &'static str,
        native: &'static str,
        field: &'static str,
        host_offset: usize,
        native_offset: usize,
    },
    #[error("{host}.{field} is {host_kind:?} but {native_kind:?} in {native}")]
    Kind {
        host: &'static str,
        native: &'static str,
        field: &'static str,
        host_kind: FieldKind,
        native_kind: FieldKind,
    },
    #[error("{host}.{field} is {host_size} bytes but {native_size} bytes in {native}")]
    FieldSize {
        host: &'static str,
        native: &'static str,
        field: &'static str,
        host_size: usize,
        native_size: usize,
    },
}

/// Matching key for a field name, or `None` for padding.
///
/// `windowID`, `window_id` and `WindowId` all map to `windowid`.
pub fn normalize_field(name: &str) -> Option<String> {
    if name == "_" || name.starts_with("pad") {
        return None;
    }
    Some(
        name.chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect(),
    )
}

fn significant_fields(layout: &RecordLayout) -> BTreeMap<String, &FieldLayout> {
    layout
        .fields
        .iter()
        .filter_map(|field| normalize_field(field.name).map(|key| (key, field)))
        .collect()
}

/// Checks that `host` can stand in for `native` across the C boundary.
pub fn check_pair(host: &RecordLayout, native: &RecordLayout) -> Result<(), LayoutMismatch> {
    if host.size != native.size {
        return Err(LayoutMismatch::Size {
            host: host.name,
            native: native.name,
            host_size: host.size,
            native_size: native.size,
        });
    }

    let host_fields = significant_fields(host);
    let native_fields = significant_fields(native);
    if host_fields.len() != native_fields.len() {
        return Err(LayoutMismatch::FieldCount {
            host: host.name,
            native: native.name,
            host_fields: host_fields.into_keys().collect(),
            native_fields: native_fields.into_keys().collect(),
        });
    }

    for field in host.fields.iter() {
        let Some(key) = normalize_field(field.name) else {
            continue;
        };
        let Some(other) = native_fields.get(&key) else {
            return Err(LayoutMismatch::MissingField {
                host: host.name,
                native: native.name,
                field: field.name,
            });
        };
        if field.offset != other.offset {
            return Err(LayoutMismatch::Offset {
                host: host.name,
                native: native.name,
                field: field.name,
                host_offset: field.offset,
                native_offset: other.offset,
            });
        }
        let both_pointers = field.kind.is_pointer_like() && other.kind.is_pointer_like();
        if field.kind != other.kind && !both_pointers {
            return Err(LayoutMismatch::Kind {
                host: host.name,
                native: native.name,
                field: field.name,
                host_kind: field.kind,
                native_kind: other.kind,
            });
        }
        if field.size != other.size {
            return Err(LayoutMismatch::FieldSize {
                host: host.name,
                native: native.name,
                field: field.name,
                host_size: field.size,
                native_size: other.size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ffi::c_void;

    #[repr(C)]
    struct Sample {
        tag: u32,
        window_id: u32,
        data: *mut c_void,
        scale: f32,
        padding_tail: [u8; crate::POINTER_GAP],
    }

    fn sample_native() -> NativeRecord {
        NativeRecord::new("sample")
            .field("tag", CType::U32)
            .field("windowID", CType::U32)
            .field("data", CType::Ptr)
            .field("scale", CType::F32)
    }

    #[test]
    fn native_layout_follows_c_rules() {
        let layout = NativeRecord::new("mixed")
            .field("a", CType::U8)
            .field("b", CType::U32)
            .field("c", CType::U16)
            .layout();
        let offsets: Vec<_> = layout.fields.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, vec![0, 4, 8]);
        assert_eq!(layout.size, 12);
        assert_eq!(layout.align, 4);
    }

    #[test]
    fn nested_records_use_their_own_alignment() {
        let inner = NativeRecord::new("inner")
            .field("x", CType::I64)
            .field("y", CType::U8)
            .layout();
        let outer = NativeRecord::new("outer")
            .field("tag", CType::U8)
            .field("inner", CType::record(&inner))
            .layout();
        assert_eq!(outer.fields[1].offset, align_of::<i64>());
        assert_eq!(outer.size, align_of::<i64>() + inner.size);
    }

    #[test]
    fn names_match_ignoring_case_and_underscores() {
        assert_eq!(normalize_field("windowID").as_deref(), Some("windowid"));
        assert_eq!(normalize_field("window_id").as_deref(), Some("windowid"));
        assert_eq!(normalize_field("type_").as_deref(), Some("type"));
        assert_eq!(normalize_field("padding3"), None);
        assert_eq!(normalize_field("_"), None);
    }

    #[test]
    fn matching_pair_passes() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale, padding_tail });
        assert_eq!(check_pair(&host, &sample_native().layout()), Ok(()));
    }

    #[test]
    fn size_mismatch_is_reported() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = sample_native().field("extra", CType::I64).layout();
        assert!(matches!(
            check_pair(&host, &native),
            Err(LayoutMismatch::Size { .. })
        ));
    }

    #[test]
    fn offset_mismatch_is_reported() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = NativeRecord::new("sample")
            .field("windowID", CType::U32)
            .field("tag", CType::U32)
            .field("data", CType::Ptr)
            .field("scale", CType::F32)
            .layout();
        let err = check_pair(&host, &native).unwrap_err();
        assert!(matches!(err, LayoutMismatch::Offset { field: "tag", .. }));
    }

    #[test]
    fn missing_field_is_reported() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = NativeRecord::new("sample")
            .field("tag", CType::U32)
            .field("windowID", CType::U32)
            .field("userdata", CType::Ptr)
            .field("scale", CType::F32)
            .layout();
        let err = check_pair(&host, &native).unwrap_err();
        assert!(matches!(err, LayoutMismatch::MissingField { field: "data", .. }));
    }

    #[test]
    fn field_count_mismatch_is_reported() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = NativeRecord::new("sample")
            .field("tag", CType::U32)
            .field("windowID", CType::U32)
            .field("data", CType::Ptr)
            .field("scale", CType::U16)
            .field("extra", CType::U16)
            .layout();
        assert!(matches!(
            check_pair(&host, &native),
            Err(LayoutMismatch::FieldCount { .. })
        ));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = NativeRecord::new("sample")
            .field("tag", CType::U32)
            .field("windowID", CType::U32)
            .field("data", CType::Ptr)
            .field("scale", CType::I32)
            .layout();
        let err = check_pair(&host, &native).unwrap_err();
        assert!(matches!(err, LayoutMismatch::Kind { field: "scale", .. }));
    }

    #[test]
    fn pointer_and_address_are_interchangeable() {
        let host = crate::host_layout!(Sample { tag, window_id, data, scale });
        let native = NativeRecord::new("sample")
            .field("tag", CType::U32)
            .field("windowID", CType::U32)
            .field("data", CType::UintPtr)
            .field("scale", CType::F32)
            .layout();
        assert_eq!(check_pair(&host, &native), Ok(()));
    }

    #[test]
    fn field_size_mismatch_is_reported() {
        #[repr(C)]
        struct Narrow {
            tag: u16,
            padding: u16,
        }
        let host = crate::host_layout!(Narrow { tag, padding });
        let native = NativeRecord::new("narrow").field("tag", CType::I32).layout();
        let err = check_pair(&host, &native).unwrap_err();
        assert!(matches!(err, LayoutMismatch::FieldSize { field: "tag", .. }));
    }
}
