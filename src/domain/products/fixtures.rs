//! Sample catalogue used by the seed command.

use super::models::{Category, NewProduct, ProductUuid};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// The six-piece sample collection, two per category.
#[must_use]
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Tailored Suit - Midnight Black".to_string(),
            description: "Impeccably crafted three-piece suit in premium Italian wool. \
                          Features hand-stitched lapels and custom lining."
                .to_string(),
            category: Category::Menswear,
            price: 2_499_00,
            images: strings(&["/collection_menswear.png"]),
            sizes: strings(&["S", "M", "L", "XL", "XXL"]),
            colors: strings(&["Black", "Navy", "Charcoal"]),
            in_stock: true,
            featured: true,
            sku: None,
            material: Some("Italian wool".to_string()),
            care_instructions: Some("Dry clean only".to_string()),
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Classic Blazer - Navy".to_string(),
            description: "Single-breasted blazer with notch lapels. Perfect for business \
                          or casual elegance."
                .to_string(),
            category: Category::Menswear,
            price: 1_799_00,
            images: strings(&["/collection_menswear.png"]),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Navy", "Gray", "Brown"]),
            in_stock: true,
            featured: false,
            sku: None,
            material: None,
            care_instructions: None,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Evening Gown - Champagne".to_string(),
            description: "Floor-length silk gown with delicate beading. Designed for \
                          unforgettable evenings."
                .to_string(),
            category: Category::Womenswear,
            price: 3_299_00,
            images: strings(&["/collection_womenswear.png"]),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Champagne", "Emerald", "Ruby"]),
            in_stock: true,
            featured: true,
            sku: None,
            material: Some("Pure silk".to_string()),
            care_instructions: None,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Silk Dress - Pearl White".to_string(),
            description: "Elegant midi dress in pure silk. Timeless design with modern \
                          sophistication."
                .to_string(),
            category: Category::Womenswear,
            price: 2_899_00,
            images: strings(&["/collection_womenswear.png"]),
            sizes: strings(&["XS", "S", "M", "L", "XL"]),
            colors: strings(&["White", "Ivory", "Blush"]),
            in_stock: true,
            featured: false,
            sku: None,
            material: Some("Pure silk".to_string()),
            care_instructions: None,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Luxury Accessories Set".to_string(),
            description: "Curated collection of premium leather goods including wallet, \
                          belt, and card holder."
                .to_string(),
            category: Category::Accessories,
            price: 1_899_00,
            images: strings(&["/accessories_collection.png"]),
            sizes: strings(&["One Size"]),
            colors: strings(&["Black", "Brown", "Tan"]),
            in_stock: true,
            featured: true,
            sku: None,
            material: Some("Full-grain leather".to_string()),
            care_instructions: None,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Designer Handbag".to_string(),
            description: "Handcrafted Italian leather handbag with gold hardware. \
                          A statement piece."
                .to_string(),
            category: Category::Accessories,
            price: 2_199_00,
            images: strings(&["/accessories_collection.png"]),
            sizes: strings(&["One Size"]),
            colors: strings(&["Black", "Burgundy", "Camel"]),
            in_stock: true,
            featured: false,
            sku: None,
            material: Some("Italian leather".to_string()),
            care_instructions: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_collection_covers_every_category() {
        let products = sample_products();

        assert_eq!(products.len(), 6);

        for category in [Category::Menswear, Category::Womenswear, Category::Accessories] {
            assert_eq!(
                products.iter().filter(|p| p.category == category).count(),
                2,
                "{category}"
            );
        }

        assert!(products.iter().all(|p| !p.images.is_empty()));
        assert_eq!(products.iter().filter(|p| p.featured).count(), 3);
    }
}
