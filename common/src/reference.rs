//! 参照カタログ（組み込みデータ）
//!
//! 宝飾品・一般商品・乗り物の3カテゴリ。キーワードの重複は
//! 部分一致の重みとしてそのまま残している。

use crate::catalog::{Category, CategoryEntry, Fallback, FallbackStep, KeywordCatalog};
use crate::rules::BonusRule;

pub const JEWELRY_ID: u32 = 1;
pub const MERCHANDISE_ID: u32 = 2;
pub const VEHICLES_ID: u32 = 3;

/// 純度表記（18k, 14 kt など）
pub const PURITY_PATTERN: &str = r"\b(?:10|14|18|22|24) ?kt?\b";
/// 重量 + 数値
pub const WEIGHT_PATTERN: &str = r"\b(?:peso|weight) \d+";

pub const PURITY_BONUS: f64 = 5.0;
pub const RING_BONUS: f64 = 3.0;
pub const WEIGHT_BONUS: f64 = 2.0;

const JEWELRY_KEYWORDS: &[&str] = &[
    "oro", "plata", "diamante", "anillo", "anillos", "collar", "pulsera", "arete", "aretes",
    "argollas", "argolla", "cadena", "reloj", "joya", "joyas", "gemas", "perla", "perlas",
    "zafiro", "rubí", "esmeralda", "brillante", "oro blanco", "oro amarillo", "plata 925",
    "plata 950", "oro 18k", "oro 14k", "oro 24k", "quilate", "kilate", "kt", "bracelet",
    "ring", "necklace", "earring", "watch", "jewelry", "gold", "silver", "argolla",
    "argollas", "sortija", "sortijas", "alianza", "alianzas", "18k", "14k", "24k", "10k",
    "22k", "18kt", "14kt", "24kt", "10kt", "22kt", "18 k", "14 k", "24 k", "10 k", "22 k",
    "18 kt", "14 kt", "24 kt", "oro 18", "oro 14", "oro 24", "oro 10", "oro 22", "pendiente",
    "pendientes", "broche", "broches", "dije", "dijes", "gemstone", "precious", "metal",
    "jewel", "jewels",
];

const MERCHANDISE_KEYWORDS: &[&str] = &[
    "telefono", "celular", "iphone", "samsung", "tablet", "laptop", "computador", "televisor",
    "tv", "refrigerador", "nevera", "lavadora", "microondas", "equipo", "herramienta",
    "electrodomestico", "electronico", "mueble", "silla", "mesa", "cama", "colchon", "ropa",
    "zapatos", "bolso", "mochila", "bicicleta", "moto", "motocicleta", "consola",
    "playstation", "xbox", "nintendo", "cámara", "camara", "audifonos", "auriculares",
    "speaker", "parlante", "radio", "stereo", "phone", "mobile", "laptop", "computer",
    "furniture", "appliance", "tool",
];

const VEHICLE_KEYWORDS: &[&str] = &[
    "carro", "auto", "automovil", "vehiculo", "moto", "motocicleta", "bicicleta", "camioneta",
    "camion", "bus", "buseta", "taxi", "moto", "scooter", "patineta", "patin", "carroceria",
    "motor", "transmision", "llantas", "neumaticos", "bateria", "accesorios auto", "repuestos",
    "car", "vehicle", "motorcycle", "bike", "truck", "suv", "sedan", "hatchback", "pickup",
    "van", "automotive", "auto parts", "bicicleta", "bicicletas",
];

const JEWELRY_FALLBACK: &[&str] = &["oro", "plata", "diamante", "joya", "anillo", "collar"];
const VEHICLE_FALLBACK: &[&str] = &["carro", "auto", "vehiculo", "moto", "bicicleta"];

pub(crate) fn reference_catalog() -> KeywordCatalog {
    let jewelry_rules = vec![
        BonusRule::pattern("quilates", PURITY_PATTERN, PURITY_BONUS).expect("purity pattern"),
        BonusRule::contains_any("argolla", &["argolla", "argollas"], RING_BONUS).expect("ring words"),
        BonusRule::pattern("peso", WEIGHT_PATTERN, WEIGHT_BONUS).expect("weight pattern"),
    ];

    let entries = vec![
        CategoryEntry::new(Category::new(JEWELRY_ID, "Joyas"), JEWELRY_KEYWORDS, jewelry_rules),
        CategoryEntry::new(Category::new(MERCHANDISE_ID, "Mercancía"), MERCHANDISE_KEYWORDS, vec![]),
        CategoryEntry::new(Category::new(VEHICLES_ID, "Vehículos"), VEHICLE_KEYWORDS, vec![]),
    ]
    .into_iter()
    .collect::<crate::Result<Vec<_>>>()
    .expect("reference keywords");

    let fallback = Fallback {
        chain: vec![
            FallbackStep {
                category_id: JEWELRY_ID,
                words: JEWELRY_FALLBACK.iter().map(|w| w.to_string()).collect(),
            },
            FallbackStep {
                category_id: VEHICLES_ID,
                words: VEHICLE_FALLBACK.iter().map(|w| w.to_string()).collect(),
            },
        ],
        default_id: MERCHANDISE_ID,
    };

    KeywordCatalog::new(entries, fallback).expect("reference catalog")
}
