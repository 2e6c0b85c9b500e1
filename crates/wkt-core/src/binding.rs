//! The seam between well-known values and an external store.
//!
//! A store adapter only needs three capabilities from a value type:
//!
//! - [`Scan`]: build the value from an [`ExternalValue`] the driver produced
//! - [`ToExternalValue`]: render the value as something the driver accepts
//! - [`ColumnKind`]: report the logical column tag used to pick a physical type
//!
//! `Option<T>` carries nullability: scanning NULL into `Option<T>` yields
//! `None`, and an absent value renders as NULL.

use crate::codec;
use crate::duration::Duration;
use crate::error::{Result, WktError};
use crate::structure::StructValue;
use crate::timestamp::Timestamp;
use crate::types::WellKnownKind;
use crate::values::ExternalValue;

/// Build a value from a store-produced [`ExternalValue`].
pub trait Scan: Sized {
    fn scan(src: &ExternalValue) -> Result<Self>;
}

/// Render a value as a store-acceptable [`ExternalValue`].
pub trait ToExternalValue {
    fn to_external_value(&self) -> ExternalValue;
}

/// Logical column tag for a value type.
pub trait ColumnKind {
    const KIND: WellKnownKind;

    fn declared_column_kind() -> &'static str {
        Self::KIND.column_kind()
    }
}

fn utf8<'a>(kind: &'static str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes)
        .map_err(|_| WktError::malformed(kind, String::from_utf8_lossy(bytes)))
}

impl Scan for Duration {
    fn scan(src: &ExternalValue) -> Result<Self> {
        match src {
            ExternalValue::Text(s) => codec::decode_duration(s),
            ExternalValue::Bytes(b) => codec::decode_duration(utf8("duration", b)?),
            // TIME columns may come back as a full date-time; keep the time of day.
            ExternalValue::Instant(dt) => Ok(Duration::from_time_of_day(dt.time())),
            ExternalValue::Null => Err(WktError::NullInput { kind: "duration" }),
            other => Err(WktError::unsupported("duration", other.type_name())),
        }
    }
}

impl ToExternalValue for Duration {
    fn to_external_value(&self) -> ExternalValue {
        ExternalValue::Text(codec::encode_duration(*self))
    }
}

impl ColumnKind for Duration {
    const KIND: WellKnownKind = WellKnownKind::Duration;
}

impl Scan for Timestamp {
    fn scan(src: &ExternalValue) -> Result<Self> {
        codec::decode_timestamp(src)
    }
}

impl ToExternalValue for Timestamp {
    fn to_external_value(&self) -> ExternalValue {
        if self.is_unset() {
            return ExternalValue::Null;
        }
        codec::encode_timestamp(*self)
    }
}

impl ColumnKind for Timestamp {
    const KIND: WellKnownKind = WellKnownKind::Timestamp;
}

impl Scan for StructValue {
    fn scan(src: &ExternalValue) -> Result<Self> {
        match src {
            ExternalValue::Bytes(b) => codec::decode_struct(b),
            ExternalValue::Text(s) => codec::decode_struct(s.as_bytes()),
            ExternalValue::Null => Err(WktError::NullInput { kind: "struct" }),
            other => Err(WktError::unsupported("struct", other.type_name())),
        }
    }
}

impl ToExternalValue for StructValue {
    fn to_external_value(&self) -> ExternalValue {
        let json = codec::encode_struct(self);
        // serde_json only ever emits UTF-8
        ExternalValue::Text(String::from_utf8_lossy(&json).into_owned())
    }
}

impl ColumnKind for StructValue {
    const KIND: WellKnownKind = WellKnownKind::Struct;
}

impl<T: Scan> Scan for Option<T> {
    fn scan(src: &ExternalValue) -> Result<Self> {
        if src.is_null() {
            tracing::debug!("NULL store value scanned as absent");
            return Ok(None);
        }
        T::scan(src).map(Some)
    }
}

impl<T: ToExternalValue> ToExternalValue for Option<T> {
    fn to_external_value(&self) -> ExternalValue {
        match self {
            Some(value) => value.to_external_value(),
            None => ExternalValue::Null,
        }
    }
}

impl<T: ColumnKind> ColumnKind for Option<T> {
    const KIND: WellKnownKind = T::KIND;
}

impl<T: ToExternalValue + ?Sized> ToExternalValue for &T {
    fn to_external_value(&self) -> ExternalValue {
        (**self).to_external_value()
    }
}
