//! Built-in nuclide table: `(canonical name, Z, A, atomic mass in u)`.
//!
//! Masses are AME2020 atomic masses. This covers the pp chains, CNO cycles,
//! hot-CNO breakout and helium burning up to the iron group; larger networks
//! should load a full table through `SpeciesCatalog::load`.

pub(crate) const BUILTIN_NUCLIDES: &[(&str, u32, u32, f64)] = &[
    ("n-1", 0, 1, 1.008_664_915_95),
    ("H-1", 1, 1, 1.007_825_032_23),
    ("H-2", 1, 2, 2.014_101_778_12),
    ("H-3", 1, 3, 3.016_049_281_32),
    ("He-3", 2, 3, 3.016_029_320_1),
    ("He-4", 2, 4, 4.002_603_254_13),
    ("He-6", 2, 6, 6.018_885_891),
    ("Li-6", 3, 6, 6.015_122_887_4),
    ("Li-7", 3, 7, 7.016_003_436_6),
    ("Li-8", 3, 8, 8.022_486_246),
    ("Be-7", 4, 7, 7.016_928_717),
    ("Be-8", 4, 8, 8.005_305_102),
    ("Be-9", 4, 9, 9.012_183_065),
    ("B-8", 5, 8, 8.024_607_3),
    ("B-10", 5, 10, 10.012_936_95),
    ("B-11", 5, 11, 11.009_305_36),
    ("C-11", 6, 11, 11.011_433_6),
    ("C-12", 6, 12, 12.0),
    ("C-13", 6, 13, 13.003_354_835_07),
    ("C-14", 6, 14, 14.003_241_988_4),
    ("N-13", 7, 13, 13.005_738_61),
    ("N-14", 7, 14, 14.003_074_004_43),
    ("N-15", 7, 15, 15.000_108_898_88),
    ("O-14", 8, 14, 14.008_596_706),
    ("O-15", 8, 15, 15.003_065_6),
    ("O-16", 8, 16, 15.994_914_619_57),
    ("O-17", 8, 17, 16.999_131_756_5),
    ("O-18", 8, 18, 17.999_159_612_86),
    ("F-17", 9, 17, 17.002_095_24),
    ("F-18", 9, 18, 18.000_937_33),
    ("F-19", 9, 19, 18.998_403_162_73),
    ("Ne-18", 10, 18, 18.005_708_7),
    ("Ne-19", 10, 19, 19.001_880_91),
    ("Ne-20", 10, 20, 19.992_440_176_2),
    ("Ne-21", 10, 21, 20.993_846_685),
    ("Ne-22", 10, 22, 21.991_385_114),
    ("Na-21", 11, 21, 20.997_654_69),
    ("Na-22", 11, 22, 21.994_437_41),
    ("Na-23", 11, 23, 22.989_769_282),
    ("Na-24", 11, 24, 23.990_962_95),
    ("Mg-22", 12, 22, 21.999_570_65),
    ("Mg-23", 12, 23, 22.994_124_21),
    ("Mg-24", 12, 24, 23.985_041_697),
    ("Mg-25", 12, 25, 24.985_836_976),
    ("Mg-26", 12, 26, 25.982_592_968),
    ("Al-25", 13, 25, 24.990_428_31),
    ("Al-26", 13, 26, 25.986_891_904),
    ("Al-27", 13, 27, 26.981_538_53),
    ("Si-27", 14, 27, 26.986_704_91),
    ("Si-28", 14, 28, 27.976_926_534_65),
    ("Si-29", 14, 29, 28.976_494_664_9),
    ("Si-30", 14, 30, 29.973_770_136),
    ("P-30", 15, 30, 29.978_313_75),
    ("P-31", 15, 31, 30.973_761_998_42),
    ("S-31", 16, 31, 30.979_557_01),
    ("S-32", 16, 32, 31.972_071_174_4),
    ("Cl-35", 17, 35, 34.968_852_682),
    ("Ar-36", 18, 36, 35.967_545_105),
    ("K-39", 19, 39, 38.963_706_486_4),
    ("Ca-40", 20, 40, 39.962_590_863),
    ("Ti-44", 22, 44, 43.959_689_95),
    ("Cr-48", 24, 48, 47.954_029_5),
    ("Fe-52", 26, 52, 51.948_113_9),
    ("Fe-54", 26, 54, 53.939_608_99),
    ("Fe-56", 26, 56, 55.934_936_33),
    ("Co-56", 27, 56, 55.939_838_8),
    ("Ni-56", 28, 56, 55.942_128_55),
];
