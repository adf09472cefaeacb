// Seeded single-octave 2D simplex noise, roughly in [−1, +1].
// Height maps stack octaves of this themselves.
#[derive(Clone)]
pub struct Simplex2D {
    perm: [u8; 512],
}

// Gradient directions for the three simplex corners
const GRAD2: [(i8, i8); 12] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

impl Simplex2D {
    pub fn new(seed: u64) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut x = seed ^ 0x1234_5678_9ABC_DEF0_u64;
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
        let perm = std::array::from_fn(|i| p[i & 255]);

        Self { perm }
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    #[inline]
    fn corner(g: (i8, i8), x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t2 = t * t;
            t2 * t2 * Self::dot(g, x, y)
        } else {
            0.0
        }
    }

    pub fn get2(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skew into the rhombus lattice and back
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle of the cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let n0 = Self::corner(GRAD2[gi0], x0, y0);
        let n1 = Self::corner(GRAD2[gi1], x1, y1);
        let n2 = Self::corner(GRAD2[gi2], x2, y2);

        70.0 * (n0 + n1 + n2)
    }
}
