//! Arrow utility functions for reading single cells
//!
//! Extract and convert individual values from Arrow arrays. Unsupported types
//! and nulls come back as `None` / `Value::Null` so the normalizer can degrade
//! the cell instead of failing the batch.

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
    Int64Array, Int8Array, LargeStringArray, StringArray, UInt8Array, UInt16Array, UInt32Array,
};
use arrow::datatypes::DataType;
use serde_json::Value;

/// Extract a string value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(String)` if the value exists, is not null and is a string type, otherwise `None`
pub fn arrow_array_to_string(array: &ArrayRef, index: usize) -> Option<String> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Utf8 => {
            let string_array = array.as_any().downcast_ref::<StringArray>()?;
            Some(string_array.value(index).to_string())
        }
        DataType::LargeUtf8 => {
            let string_array = array.as_any().downcast_ref::<LargeStringArray>()?;
            Some(string_array.value(index).to_string())
        }
        _ => None,
    }
}

/// Extract a float value from an Arrow array at the specified index, handling nulls
///
/// # Returns
/// `Some(f64)` if the value exists and is not null, otherwise `None`
pub fn arrow_array_to_f64(array: &ArrayRef, index: usize) -> Option<f64> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Int8 => {
            let int_array = array.as_any().downcast_ref::<Int8Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::Int16 => {
            let int_array = array.as_any().downcast_ref::<Int16Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::Int32 => {
            let int_array = array.as_any().downcast_ref::<Int32Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::Int64 => {
            let int_array = array.as_any().downcast_ref::<Int64Array>()?;
            Some(int_array.value(index) as f64)
        }
        DataType::UInt8 => {
            let int_array = array.as_any().downcast_ref::<UInt8Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::UInt16 => {
            let int_array = array.as_any().downcast_ref::<UInt16Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::UInt32 => {
            let int_array = array.as_any().downcast_ref::<UInt32Array>()?;
            Some(f64::from(int_array.value(index)))
        }
        DataType::Float32 => {
            let float_array = array.as_any().downcast_ref::<Float32Array>()?;
            Some(f64::from(float_array.value(index)))
        }
        DataType::Float64 => {
            let float_array = array.as_any().downcast_ref::<Float64Array>()?;
            Some(float_array.value(index))
        }
        _ => None,
    }
}

/// Extract a boolean value from an Arrow array at the specified index, handling nulls
pub fn arrow_array_to_bool(array: &ArrayRef, index: usize) -> Option<bool> {
    if array.is_null(index) {
        return None;
    }

    match array.data_type() {
        DataType::Boolean => {
            let bool_array = array.as_any().downcast_ref::<BooleanArray>()?;
            Some(bool_array.value(index))
        }
        _ => None,
    }
}

/// Convert one cell to a JSON value
///
/// Numbers become JSON numbers (whole values as integers, NaN as null),
/// strings stay strings, everything else is null.
pub fn arrow_cell_to_json(array: &ArrayRef, index: usize) -> Value {
    if let Some(number) = arrow_array_to_f64(array, index) {
        // keeps numeric ids readable as "2001" rather than "2001.0"
        if number.fract() == 0.0 && number.abs() < 9.0e15 {
            return Value::from(number as i64);
        }
        return serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number);
    }
    if let Some(text) = arrow_array_to_string(array, index) {
        return Value::String(text);
    }
    arrow_array_to_bool(array, index).map_or(Value::Null, Value::Bool)
}
