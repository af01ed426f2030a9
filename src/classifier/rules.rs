use serde::Serialize;

use super::QueryKind;
use super::dataset::DatasetTag;

/// A single entry of the ordered rule table.
///
/// `all_of` is a conjunction of keyword groups; a group is satisfied when the
/// normalized question contains any one of its keywords.
#[derive(Debug, Serialize)]
pub struct Rule {
    pub name: &'static str,
    pub kind: QueryKind,
    pub dataset: DatasetTag,
    pub all_of: &'static [&'static [&'static str]],
    pub sql: &'static str,
    pub explanation: &'static str,
}

impl Rule {
    /// `normalized` must already be lower-cased and trimmed.
    pub fn matches(&self, normalized: &str) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|keyword| normalized.contains(keyword)))
    }
}

/// Rules in priority order. The first match wins.
pub static RULES: &[Rule] = &[
    Rule {
        name: "users-by-activity",
        kind: QueryKind::Users,
        dataset: DatasetTag::Default,
        all_of: &[&["kullanıcı"], &["aktif", "en çok"]],
        sql: "SELECT kullanıcı_id, COUNT(*) as toplam_aktivite
FROM kullanıcı_aktiviteleri
GROUP BY kullanıcı_id
ORDER BY toplam_aktivite DESC
LIMIT 10;",
        explanation: "Bu sorgu, toplam aktivite sayılarına göre en aktif kullanıcıları bulur.",
    },
    Rule {
        name: "daily-sales-last-30-days",
        kind: QueryKind::Sales,
        dataset: DatasetTag::Sales,
        all_of: &[&["satış", "satis"], &["son ay", "geçen ay"]],
        sql: "SELECT
  DATE_TRUNC('day', oluşturulma_tarihi) as gün,
  SUM(tutar) as günlük_satış
FROM satışlar
WHERE oluşturulma_tarihi >= CURRENT_DATE - INTERVAL '30 days'
GROUP BY DATE_TRUNC('day', oluşturulma_tarihi)
ORDER BY gün;",
        explanation: "Bu sorgu, son 30 günün günlük satış toplamlarını hesaplar.",
    },
    Rule {
        name: "top-products-by-revenue",
        kind: QueryKind::Revenue,
        dataset: DatasetTag::Revenue,
        all_of: &[&["gelir", "ürün", "urun"]],
        sql: "SELECT
  p.ürün_adı,
  p.kategori,
  SUM(o.miktar * o.fiyat) as gelir
FROM ürünler p
JOIN sipariş_öğeleri o ON p.ürün_id = o.ürün_id
GROUP BY p.ürün_adı, p.kategori
ORDER BY gelir DESC
LIMIT 10;",
        explanation: "Bu sorgu, gelire göre en iyi 10 ürünü gösterir.",
    },
    Rule {
        name: "daily-production-last-7-days",
        kind: QueryKind::Production,
        dataset: DatasetTag::Production,
        all_of: &[&["üretim", "uretim", "production"]],
        sql: "SELECT
  tarih as gün,
  SUM(uretim_adedi) as günlük_üretim
FROM hat_kayitlari
WHERE tarih >= CURRENT_DATE - INTERVAL '7 days'
GROUP BY tarih
ORDER BY tarih;",
        explanation: "Bu sorgu, son 7 günün günlük üretim adetlerini hesaplar.",
    },
    Rule {
        name: "oee-by-shift",
        kind: QueryKind::Oee,
        dataset: DatasetTag::Oee,
        all_of: &[&["oee", "verimlilik", "vardiya"]],
        sql: "SELECT
  vardiya,
  ROUND(AVG(oee), 1) as ortalama_oee
FROM hat_kayitlari
GROUP BY vardiya
ORDER BY vardiya;",
        explanation: "Bu sorgu, vardiyalara göre ortalama OEE değerlerini hesaplar.",
    },
    Rule {
        name: "scrap-reasons",
        kind: QueryKind::Quality,
        dataset: DatasetTag::Quality,
        all_of: &[&["hurda", "kalite", "scrap", "quality"]],
        sql: "SELECT
  hurda_nedeni,
  SUM(adet) as toplam_hurda
FROM hurda_kayitlari
GROUP BY hurda_nedeni
ORDER BY toplam_hurda DESC;",
        explanation: "Bu sorgu, hurda adetlerini nedenlerine göre dağıtır.",
    },
];
