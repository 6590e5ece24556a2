use contracts::domain::a001_shop::{BusinessHours, Shop, ShopDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_shop::api;
use crate::system::auth::guard::RequireAdmin;

/// "11:30" or "1130" → 1130
fn parse_hhmm(input: &str) -> Option<u32> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }
    digits.parse().ok()
}

/// "ランチ 11:30-14:00" per line; the label is optional
fn parse_business_hours(text: &str) -> Result<Vec<BusinessHours>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (label, span) = match line.rsplit_once(' ') {
                Some((label, span)) => (Some(label.trim().to_string()), span),
                None => (None, line),
            };
            let (open, close) = span
                .split_once('-')
                .ok_or_else(|| format!("営業時間の形式が正しくありません: {}", line))?;
            match (parse_hhmm(open), parse_hhmm(close)) {
                (Some(open), Some(close)) => Ok(BusinessHours { label, open, close }),
                _ => Err(format!("営業時間の形式が正しくありません: {}", line)),
            }
        })
        .collect()
}

fn parse_coordinate(input: &str) -> Result<Option<f64>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| format!("座標が数値ではありません: {}", input))
}

/// `/admin`: register a shop
#[component]
pub fn AdminFormPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <ShopForm />
        </RequireAdmin>
    }
}

#[component]
fn ShopForm() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let genre = RwSignal::new(String::new());
    let station = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let price_range = RwSignal::new(String::new());
    let latitude = RwSignal::new(String::new());
    let longitude = RwSignal::new(String::new());
    let hours = RwSignal::new(String::new());
    let is_landmark = RwSignal::new(false);
    let (message, set_message) = signal(None::<Result<String, String>>);
    let (saving, set_saving) = signal(false);

    let build_dto = move || -> Result<ShopDto, String> {
        let dto = ShopDto {
            id: None,
            name: name.get_untracked(),
            genre: genre.get_untracked(),
            station: station.get_untracked(),
            address: address.get_untracked(),
            price_range: price_range.get_untracked(),
            latitude: parse_coordinate(&latitude.get_untracked())?,
            longitude: parse_coordinate(&longitude.get_untracked())?,
            business_hours: parse_business_hours(&hours.get_untracked())?,
            is_landmark: is_landmark.get_untracked(),
        };
        Shop::new_for_insert(&dto).validate()?;
        Ok(dto)
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let dto = match build_dto() {
            Ok(dto) => dto,
            Err(e) => {
                set_message.set(Some(Err(e)));
                return;
            }
        };
        set_saving.set(true);
        spawn_local(async move {
            match api::save_shop(&dto).await {
                Ok(_) => {
                    set_message.set(Some(Ok(format!("「{}」を登録しました。", dto.name))));
                    for field in [name, genre, station, address, price_range, latitude, longitude, hours] {
                        field.set(String::new());
                    }
                    is_landmark.set(false);
                }
                Err(e) => set_message.set(Some(Err(e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="admin-form">
            <h2>"店舗登録"</h2>

            {move || message.get().map(|m| match m {
                Ok(text) => view! { <div class="success-message">{text}</div> }.into_any(),
                Err(text) => view! { <div class="error-message">{text}</div> }.into_any(),
            })}

            <Flex vertical=true gap=FlexGap::Medium>
                <Field label="店名"><Input value=name /></Field>
                <Field label="ジャンル"><Input value=genre placeholder="ラーメン" /></Field>
                <Field label="最寄り駅"><Input value=station placeholder="梅田" /></Field>
                <Field label="住所"><Input value=address /></Field>
                <Field label="価格帯"><Input value=price_range placeholder="1000~2000" /></Field>
                <Flex gap=FlexGap::Medium>
                    <Field label="緯度"><Input value=latitude /></Field>
                    <Field label="経度"><Input value=longitude /></Field>
                </Flex>
                <Field label="営業時間（1行に1枠: ランチ 11:30-14:00）">
                    <Textarea value=hours />
                </Field>
                <Checkbox checked=is_landmark label="目印として表示（駅ページの基準地点）" />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=on_save
                >
                    "登録する"
                </Button>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_business_hours() {
        let parsed = parse_business_hours("ランチ 11:30-14:00\n\n18:00-2300").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].label.as_deref(), Some("ランチ"));
        assert_eq!((parsed[0].open, parsed[0].close), (1130, 1400));
        assert_eq!(parsed[1].label, None);
        assert_eq!(parsed[1].close, 2300);
    }

    #[test]
    fn test_parse_business_hours_rejects_garbage() {
        assert!(parse_business_hours("いつでも").is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate(" ").unwrap(), None);
        assert_eq!(parse_coordinate("34.67").unwrap(), Some(34.67));
        assert!(parse_coordinate("north").is_err());
    }
}
