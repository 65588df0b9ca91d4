//! Seller form validation.
//!
//! Forms hold raw user input. `validate` either produces a typed draft or
//! reports every failing field at once; it never returns an error path.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductType, Shop, Variant, VariantOption};
use crate::ids::{ProductId, SellerId, ShopId};
use crate::money::{Currency, Money};

/// Minimum length of a shop description.
const MIN_SHOP_DESCRIPTION: usize = 50;

/// Field name to message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Raw input of the product listing form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub base_price: String,
    pub category: String,
    #[serde(default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub images: Vec<String>,
    pub inventory: String,
    #[serde(default)]
    pub variants: Vec<VariantForm>,
}

/// Raw input for one variant dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantForm {
    pub name: String,
    pub options: Vec<OptionForm>,
}

/// Raw input for one variant option. Blank price and stock are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionForm {
    pub value: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub hex: String,
}

/// A validated listing, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub base_price: Money,
    pub category: String,
    pub product_type: ProductType,
    /// Non-blank image URLs, never empty.
    pub images: Vec<String>,
    pub inventory: i64,
    pub variants: Vec<Variant>,
}

impl ProductForm {
    /// Validate the form.
    ///
    /// Options without a parseable positive price take the base price;
    /// options without a parseable stock get 0. Variants need a name and
    /// distinct, non-blank option values with no negative stock.
    pub fn validate(&self, currency: Currency) -> Result<ProductDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        let base_price = Money::parse_decimal(&self.base_price, currency)
            .filter(|p| p.amount_cents > 0);
        if base_price.is_none() {
            errors.add("base_price", "Valid price is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }
        let inventory = self.inventory.trim().parse::<i64>().ok().filter(|i| *i >= 0);
        if inventory.is_none() {
            errors.add("inventory", "Valid inventory is required");
        }
        let images: Vec<String> = self
            .images
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();
        if images.is_empty() {
            errors.add("images", "At least one image URL is required");
        }
        for (i, variant) in self.variants.iter().enumerate() {
            variant.check(&format!("variants[{}]", i), &mut errors);
        }

        let (Some(base_price), Some(inventory)) = (base_price, inventory) else {
            return Err(errors);
        };

        errors.into_result(|| ProductDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            base_price,
            category: self.category.trim().to_string(),
            product_type: self.product_type,
            images,
            inventory,
            variants: self
                .variants
                .iter()
                .map(|v| v.to_variant(base_price))
                .collect(),
        })
    }
}

impl VariantForm {
    fn check(&self, field: &str, errors: &mut FieldErrors) {
        if self.name.trim().is_empty() {
            errors.add(&format!("{}.name", field), "Variant name is required");
        }
        if self.options.is_empty() {
            errors.add(&format!("{}.options", field), "At least one option is required");
        }
        let mut seen = HashSet::new();
        for (j, option) in self.options.iter().enumerate() {
            let value = option.value.trim();
            if value.is_empty() {
                errors.add(&format!("{}.options[{}].value", field, j), "Option value is required");
            } else if !seen.insert(value) {
                errors.add(
                    &format!("{}.options[{}].value", field, j),
                    "Option values must be unique",
                );
            }
            if option.stock.trim().parse::<i64>().is_ok_and(|stock| stock < 0) {
                errors.add(&format!("{}.options[{}].stock", field, j), "Stock cannot be negative");
            }
        }
    }

    fn to_variant(&self, base_price: Money) -> Variant {
        let options = self
            .options
            .iter()
            .map(|o| {
                let price = Money::parse_decimal(&o.price, base_price.currency)
                    .filter(|p| !p.is_zero())
                    .unwrap_or(base_price);
                let stock = o.stock.trim().parse::<i64>().unwrap_or(0);
                let mut option = VariantOption::new(o.value.trim())
                    .with_price(price)
                    .with_stock(stock);
                if !o.hex.trim().is_empty() {
                    option = option.with_hex(o.hex.trim());
                }
                option
            })
            .collect();
        Variant::new(self.name.trim(), options)
    }
}

impl ProductDraft {
    /// Turn the draft into a product owned by `seller_id`.
    pub fn into_product(self, id: ProductId, shop_id: ShopId, seller_id: SellerId) -> Product {
        let mut product = Product::new(id, shop_id, self.title, self.base_price, self.inventory);
        product.seller_id = Some(seller_id);
        product.description = self.description;
        product.category = self.category;
        product.product_type = self.product_type;
        product.images = self.images;
        product.variants = self.variants;
        product
    }

    /// Overwrite the editable fields of an existing product.
    pub fn apply_to(self, product: &mut Product) {
        product.title = self.title;
        product.description = self.description;
        product.base_price = self.base_price;
        product.category = self.category;
        product.product_type = self.product_type;
        product.images = self.images;
        product.inventory = self.inventory;
        product.variants = self.variants;
        product.updated_at = Some(crate::current_timestamp());
    }
}

/// Raw input of the "become a seller" shop form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopForm {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub banner_image: String,
    pub logo_image: String,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

/// A validated shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub banner_image: String,
    pub logo_image: String,
    pub social_links: BTreeMap<String, String>,
}

impl ShopForm {
    /// Start a form with the slug derived from `name`.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ShopDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Shop name is required");
        }
        if self.slug.trim().is_empty() {
            errors.add("slug", "Shop URL is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        } else if self.description.chars().count() < MIN_SHOP_DESCRIPTION {
            errors.add("description", "Description must be at least 50 characters");
        }
        check_url(&mut errors, "banner_image", "Banner image URL is required", &self.banner_image);
        check_url(&mut errors, "logo_image", "Logo image URL is required", &self.logo_image);

        errors.into_result(|| ShopDraft {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: self.description.clone(),
            banner_image: self.banner_image.trim().to_string(),
            logo_image: self.logo_image.trim().to_string(),
            social_links: self
                .social_links
                .iter()
                .filter(|(_, url)| !url.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.trim().to_string()))
                .collect(),
        })
    }
}

impl ShopDraft {
    pub fn into_shop(self, id: ShopId, seller_id: SellerId) -> Shop {
        let mut shop = Shop::new(id, seller_id, self.name, self.slug);
        shop.description = self.description;
        shop.banner_image = Some(self.banner_image);
        shop.logo_image = Some(self.logo_image);
        shop.social_links = self.social_links;
        shop
    }
}

fn check_url(errors: &mut FieldErrors, field: &str, required: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, required);
        return;
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    if rest.map_or(true, str::is_empty) {
        errors.add(field, "Please enter a valid URL");
    }
}

/// Lowercase, runs of non-alphanumerics become one `-`, no leading or trailing `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
