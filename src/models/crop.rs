use serde::{Deserialize, Serialize};

pub const TREND_LABELS: [&str; 4] = ["Jan", "Feb", "Mar", "Apr"];

/// A recommended crop. Names returned by the prediction service that are
/// outside the known set are kept verbatim as `Unlisted`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Tomato,
    Rice,
    Carrot,
    Cotton,
    Maize,
    Unlisted(String),
}

impl Crop {
    pub fn all() -> &'static [Crop] {
        &[
            Crop::Tomato,
            Crop::Rice,
            Crop::Carrot,
            Crop::Cotton,
            Crop::Maize,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Crop::Tomato => "Tomato",
            Crop::Rice => "Rice",
            Crop::Carrot => "Carrot",
            Crop::Cotton => "Cotton",
            Crop::Maize => "Maize",
            Crop::Unlisted(name) => name,
        }
    }

    /// Map a crop name onto the known set, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tomato" => Crop::Tomato,
            "rice" => Crop::Rice,
            "carrot" => Crop::Carrot,
            "cotton" => Crop::Cotton,
            "maize" | "corn" => Crop::Maize,
            _ => Crop::Unlisted(name.trim().to_string()),
        }
    }

    pub fn is_listed(&self) -> bool {
        !matches!(self, Crop::Unlisted(_))
    }

    pub fn assets(&self) -> Option<&'static CropAssets> {
        CROP_ASSETS
            .iter()
            .find(|(crop, _)| crop == self)
            .map(|(_, assets)| assets)
    }

    /// Image reference for the output region; empty when the crop is unlisted.
    pub fn image_ref(&self) -> &'static str {
        self.assets().map(|a| a.image_ref).unwrap_or("")
    }

    pub fn trend(&self) -> Option<&'static [f64; 4]> {
        self.assets().map(|a| &a.trend)
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static presentation assets for a crop. Trend values are ₹/kg for Jan-Apr.
#[derive(Debug)]
pub struct CropAssets {
    pub image_ref: &'static str,
    pub trend: [f64; 4],
}

static CROP_ASSETS: [(Crop, CropAssets); 5] = [
    (
        Crop::Tomato,
        CropAssets {
            image_ref: "https://images2.alphacoders.com/110/thumb-1920-1106600.jpg",
            trend: [20.0, 22.0, 25.0, 28.0],
        },
    ),
    (
        Crop::Rice,
        CropAssets {
            image_ref: "https://www.learnreligions.com/thmb/5VvWl15le3qQhn33Pu2K0qoh26k=/750x0/filters:no_upscale():max_bytes(150000):strip_icc():format(webp)/GettyImages-682901474-5c6450dcc9e77c0001566eab.jpg",
            trend: [32.0, 31.0, 30.5, 30.0],
        },
    ),
    (
        Crop::Carrot,
        CropAssets {
            image_ref: "https://i5.walmartimages.com/seo/Tendersweet-Carrot-Seeds-5-Lb-Non-GMO-Heirloom-Vegetable-Garden-Seeds-Gardening-by-Mountain-Valley-Seeds_e66fb972-b06a-4e45-bde6-a20a07f466a4_1.1885534e934f61f2cca9f3e15535ce53.jpeg",
            trend: [25.0, 30.0, 33.0, 35.0],
        },
    ),
    (
        Crop::Cotton,
        CropAssets {
            image_ref: "https://blogger.googleusercontent.com/img/b/R29vZ2xl/AVvXsEjWYmW9pgI_y_NDCxGs6lB8LpSZbe8MEnmIiA410lPjOCHW8fPlsW1vld1Q-_ol5-X_RIia4G9jUP8-TJEC9rpNmbWQy4lQem4CsC37DDdXZ70ZUiyLEhVhTJoMg2F_RxW0qqMYjSdJxJs/s400/Cotton.jpg",
            trend: [45.0, 48.0, 50.0, 52.0],
        },
    ),
    (
        Crop::Maize,
        CropAssets {
            image_ref: "https://bolbel.com/wp-content/uploads/2018/06/Maize.jpg",
            trend: [18.0, 19.0, 19.5, 20.0],
        },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_from_name_known() {
        assert_eq!(Crop::from_name("Tomato"), Crop::Tomato);
        assert_eq!(Crop::from_name("rice"), Crop::Rice);
        assert_eq!(Crop::from_name(" CARROT "), Crop::Carrot);
        assert_eq!(Crop::from_name("corn"), Crop::Maize);
    }

    #[test]
    fn crop_from_name_unlisted() {
        let crop = Crop::from_name("Banana");
        assert_eq!(crop, Crop::Unlisted("Banana".to_string()));
        assert!(!crop.is_listed());
        assert_eq!(crop.as_str(), "Banana");
    }

    #[test]
    fn every_listed_crop_has_assets() {
        for crop in Crop::all() {
            let assets = crop.assets().expect("listed crop without assets");
            assert!(!assets.image_ref.is_empty());
            assert_eq!(assets.trend.len(), TREND_LABELS.len());
        }
    }

    #[test]
    fn unlisted_crop_has_empty_image_and_no_trend() {
        let crop = Crop::Unlisted("Banana".into());
        assert_eq!(crop.image_ref(), "");
        assert!(crop.trend().is_none());
    }

    #[test]
    fn trend_series_values() {
        assert_eq!(Crop::Rice.trend(), Some(&[32.0, 31.0, 30.5, 30.0]));
        assert_eq!(Crop::Maize.trend(), Some(&[18.0, 19.0, 19.5, 20.0]));
    }
}
