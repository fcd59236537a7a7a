//! A hasher which hands back the integer it's given. With it, an integer key
//! lands in bucket `key % bucket_count`, which makes bucket layouts easy to
//! reason about in tests and benchmarks.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. A key which hashes as a single integer of
/// at most 64 bits hashes to exactly that integer. Anything written in more
/// than one piece (strings, tuples, `u128`) is folded together a byte-rotation
/// at a time, which keeps every write in play but spreads keys poorly.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    fn fold(&mut self, word: u64) {
        self.0 = self.0.rotate_left(8) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        // native-endian bytes, read back into the integers they came from
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            if cfg!(target_endian = "little") {
                buf[..chunk.len()].copy_from_slice(chunk);
            } else {
                buf[8 - chunk.len()..].copy_from_slice(chunk);
            }
            self.fold(u64::from_ne_bytes(buf));
        }
    }

    // sign-extending would scatter negative keys across the top of the range,
    // so signed keys keep their two's complement bit pattern at their width
    fn write_i8(&mut self, i: i8) {
        self.fold(i as u8 as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.fold(i as u16 as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.fold(i as u32 as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.fold(i as u64);
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hasher};

    use super::{BuildIdentityHasher, IdentityHasher};

    #[test]
    fn test_hasher() {
        let mut h0 = IdentityHasher(0);
        h0.write_u64(0xc8c8c8c8);
        assert_eq!(0xc8c8c8c8, h0.finish());

        let mut h1 = IdentityHasher(0);
        h1.write_u64(0xc8c8c8c8c8c8c8c8);
        assert_eq!(0xc8c8c8c8c8c8c8c8, h1.finish());

        let mut h2 = IdentityHasher(0);
        h2.write(&0x0102u16.to_ne_bytes());
        assert_eq!(0x0102, h2.finish());
    }

    #[test]
    fn test_hash_one_matches_key() {
        let build = BuildIdentityHasher;
        assert_eq!(3, build.hash_one(3i32));
        assert_eq!(7, build.hash_one(7u64));
        assert_eq!(0xffff_ffff, build.hash_one(-1i32));
    }

    #[test]
    fn test_multi_part_keys_use_every_part() {
        let build = BuildIdentityHasher;
        assert_ne!(build.hash_one("ab"), build.hash_one("cb"));
        assert_ne!(build.hash_one((1u8, 2u8)), build.hash_one((3u8, 2u8)));
        assert_ne!(build.hash_one(1u128), build.hash_one(2u128));
    }

    #[test]
    fn test_long_writes_do_not_panic() {
        let mut hasher = IdentityHasher(0);
        hasher.write(&[0xab; 20]);
        assert_ne!(0, hasher.finish());
    }
}
