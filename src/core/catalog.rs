//! Built-in catalog used until the legacy pages are available.

use crate::domain::model::{CaseStudy, ServiceRecord};
use chrono::NaiveDate;

fn images(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_services(today: NaiveDate) -> Vec<ServiceRecord> {
    vec![
        ServiceRecord {
            title: "Высотная покраска фасадов".to_string(),
            slug: "vysotniaya-pokraska-fasadov".to_string(),
            category: "Высотные работы".to_string(),
            excerpt: "Профессиональная покраска фасадов зданий методом промышленного альпинизма без лесов и подъемников."
                .to_string(),
            content: "## Преимущества высотной покраски\n\n\
             - Работы без строительных лесов - экономия до 60%\n\
             - Минимальные сроки выполнения - от 3 дней\n\
             - Любая высота и сложность архитектуры\n\n\
             ## Этапы выполнения\n\n\
             1. **Обследование фасада** - оценка состояния поверхности\n\
             2. **Подготовка поверхности** - очистка, грунтование\n\
             3. **Нанесение покрытий** - в 2-3 слоя с контролем качества\n\n\
             ## Гарантии\n\n\
             - Гарантия на покрытие до 8 лет\n\
             - Страхование ответственности"
                .to_string(),
            images: images(&["/images/services/pokraska/1.webp", "/images/services/pokraska/2.webp"]),
            price: Some("От 280 ₽/м²".to_string()),
            updated_at: today,
        },
        ServiceRecord {
            title: "Герметизация межпанельных швов".to_string(),
            slug: "germetizatsiya-shvov".to_string(),
            category: "Высотные работы".to_string(),
            excerpt: "Герметизация и утепление межпанельных швов современными материалами для защиты от промерзания и протечек."
                .to_string(),
            content: "## Преимущества герметизации швов\n\n\
             - Устранение промерзаний и сквозняков\n\
             - Защита от атмосферных осадков\n\
             - Энергосбережение до 30%\n\n\
             ## Этапы выполнения\n\n\
             1. **Демонтаж старого герметика** - полная очистка швов\n\
             2. **Укладка утеплителя** - энергосберегающие материалы\n\
             3. **Нанесение герметика** - в 2 слоя с армированием\n\n\
             ## Гарантии\n\n\
             - Гарантия на герметизацию до 10 лет"
                .to_string(),
            images: images(&["/images/services/germetik/1.webp", "/images/services/germetik/2.webp"]),
            price: Some("От 450 ₽/п.м".to_string()),
            updated_at: today,
        },
        ServiceRecord {
            title: "Мойка фасадов и остекления".to_string(),
            slug: "moyka-fasadov-ostekleniya".to_string(),
            category: "Клининг".to_string(),
            excerpt: "Профессиональная мойка фасадов, витражей и остекления высотных зданий с применением альпинистского снаряжения."
                .to_string(),
            content: "## Виды работ\n\n\
             - Мойка стеклянных фасадов и витражей\n\
             - Очистка композитных и металлических панелей\n\
             - Удаление высолов и коррозии\n\n\
             ## Регулярное обслуживание\n\n\
             - Комплексные договоры на год\n\
             - Экстренные выезды в течение 4 часов"
                .to_string(),
            images: images(&["/images/services/moyka/1.webp", "/images/services/moyka/2.webp"]),
            price: Some("От 35 ₽/м²".to_string()),
            updated_at: today,
        },
    ]
}

pub fn builtin_cases() -> Vec<CaseStudy> {
    vec![
        CaseStudy {
            title: "Антикоррозийная защита бизнес-центра".to_string(),
            slug: "business-center-moscow".to_string(),
            excerpt: "Обработка несущих металлоконструкций 24-этажного здания без остановки работы арендаторов."
                .to_string(),
            content: "## Задача\n\nЗащитить металлоконструкции фасада.\n\n## Решение\n\nПескоструй Sa 2.5 и двухкомпонентная система."
                .to_string(),
            category: "Антикор".to_string(),
            cover: Some("/images/cases/bc-moscow/cover.webp".to_string()),
            gallery: vec!["/images/cases/bc-moscow/1.webp".to_string()],
            location: Some("Москва".to_string()),
            team_size: Some(8),
            duration: Some("6 недель".to_string()),
            technologies: vec!["Sa 2.5".to_string(), "Airless".to_string()],
            client: Some("БЦ «Северный»".to_string()),
            updated_at: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap_or_default(),
        },
        CaseStudy {
            title: "Окраска пролётов моста".to_string(),
            slug: "bridge-spb".to_string(),
            excerpt: "Высотная окраска металлических пролётов моста над Невой.".to_string(),
            content: "## Задача\n\nОбновить покрытие пролётов.\n\n## Решение\n\nРабота с верёвочного доступа без перекрытия движения."
                .to_string(),
            category: "Высотные работы".to_string(),
            cover: None,
            gallery: Vec::new(),
            location: Some("Санкт-Петербург".to_string()),
            team_size: Some(12),
            duration: Some("3 месяца".to_string()),
            technologies: vec!["Промальп".to_string()],
            client: None,
            updated_at: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap_or_default(),
        },
    ]
}
