/*
    Cryptography utilities

    Copyright 2018 by Kzen Networks

    This file is part of Cryptography utilities library
    (https://github.com/KZen-networks/cryptography-utils)

    Cryptography utilities is free software: you can redistribute
    it and/or modify it under the terms of the GNU General Public
    License as published by the Free Software Foundation, either
    version 3 of the License, or (at your option) any later version.

    @license GPL-3.0+ <https://github.com/KZen-networks/cryptography-utils/blob/master/LICENSE>
*/

pub mod big_native;
pub mod samplable;
pub mod traits;

pub use big_native::BigInt;
pub use samplable::random_bytes;
pub use traits::{
    BitManipulation, Converter, Modulo, NumberTests, Primes, Roots, Samplable, EGCD,
};
