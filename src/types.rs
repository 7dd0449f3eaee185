//! Marker types naming the width and byte order of fields in binary records.
//!
//! These types are never instantiated.
//! `Position<u16_le>::read_from` returns a native `u16`, and so on.
#![allow(non_camel_case_types)]

use crate::errors::DecodeError;
use crate::parsing::{Layout, ReadFromBytes};
use std::mem;

macro_rules! byte_order_types {
    ($( $Name: ident: $Int: ty = $from_bytes: ident; )+) => {
        $(
            /// A fixed-width number with an explicit byte order
            #[derive(Debug)]
            pub(crate) enum $Name {}

            impl Layout for $Name {
                const SIZE: u32 = mem::size_of::<$Int>() as u32;
            }

            impl ReadFromBytes for $Name {
                type Value = $Int;

                #[inline]
                fn read_from(bytes: &[u8]) -> Result<$Int, DecodeError> {
                    let mut array = [0; mem::size_of::<$Int>()];
                    let bytes = bytes.get(..array.len()).ok_or(DecodeError::BufferTruncated)?;
                    array.copy_from_slice(bytes);
                    Ok(<$Int>::$from_bytes(array))
                }
            }
        )+
    }
}

byte_order_types! {
    u16_le: u16 = from_le_bytes;
    i16_le: i16 = from_le_bytes;
    u32_le: u32 = from_le_bytes;
    i32_le: i32 = from_le_bytes;
    f32_le: f32 = from_le_bytes;
    u32_be: u32 = from_be_bytes;
    i32_be: i32 = from_be_bytes;
}

macro_rules! single_byte_types {
    ($( $Int: ty ),+) => {
        $(
            impl Layout for $Int {
                const SIZE: u32 = 1;
            }

            impl ReadFromBytes for $Int {
                type Value = $Int;

                #[inline]
                fn read_from(bytes: &[u8]) -> Result<$Int, DecodeError> {
                    let byte = *bytes.first().ok_or(DecodeError::BufferTruncated)?;
                    Ok(<$Int>::from_ne_bytes([byte]))
                }
            }
        )+
    }
}

single_byte_types!(u8, i8);
