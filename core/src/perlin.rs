use crate::NoiseGenerator;

// Seeded single-octave gradient noise over 3D space, remapped into [0, 1].
// Lower dimensions are sampled through the `NoiseGenerator` defaults, which
// pin the unused axes at 0.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Perlin {
    pub fn new(seed: u64) -> Self {
        // Fisher–Yates shuffle of 0..256 driven by a xorshift RNG
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut x = seed ^ 0xAABBCCDDEEFF1122_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        // Duplicate so corner lookups never need a modulo
        let perm = std::array::from_fn(|i| p[i & 255]);

        Self { perm }
    }

    // 6t^5 − 15t^4 + 10t^3
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of the 12 cube-edge gradients from the low 4 bits of the hash
    #[inline]
    fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    #[inline]
    fn hash(&self, xi: usize, yi: usize, zi: usize) -> u8 {
        let a = self.perm[xi] as usize + yi;
        let b = self.perm[a] as usize + zi;
        self.perm[b]
    }

    // Raw noise, roughly in [−1, +1]
    pub fn raw(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;
        let (xf, yf, zf) = (x - fx, y - fy, z - fz);
        let (u, v, w) = (Self::fade(xf), Self::fade(yf), Self::fade(zf));

        let aaa = self.hash(xi, yi, zi);
        let aba = self.hash(xi, yi + 1, zi);
        let aab = self.hash(xi, yi, zi + 1);
        let abb = self.hash(xi, yi + 1, zi + 1);
        let baa = self.hash(xi + 1, yi, zi);
        let bba = self.hash(xi + 1, yi + 1, zi);
        let bab = self.hash(xi + 1, yi, zi + 1);
        let bbb = self.hash(xi + 1, yi + 1, zi + 1);

        let x1 = Self::lerp(
            Self::grad(aaa, xf, yf, zf),
            Self::grad(baa, xf - 1.0, yf, zf),
            u,
        );
        let x2 = Self::lerp(
            Self::grad(aba, xf, yf - 1.0, zf),
            Self::grad(bba, xf - 1.0, yf - 1.0, zf),
            u,
        );
        let y1 = Self::lerp(x1, x2, v);

        let x3 = Self::lerp(
            Self::grad(aab, xf, yf, zf - 1.0),
            Self::grad(bab, xf - 1.0, yf, zf - 1.0),
            u,
        );
        let x4 = Self::lerp(
            Self::grad(abb, xf, yf - 1.0, zf - 1.0),
            Self::grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = Self::lerp(x3, x4, v);

        Self::lerp(y1, y2, w)
    }
}

impl NoiseGenerator for Perlin {
    // Same contract as a sketching `noise()` call: smooth, deterministic, in [0, 1]
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.raw(x, y, z) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}
