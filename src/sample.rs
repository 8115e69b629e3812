use chrono::{Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::store::Dataset;
use crate::{ContentItem, Creator, PerformanceSnapshot, Platform};

/// Title pool with repeated topic prefixes so pattern extraction has
/// real groups to find.
const TITLES: [&str; 10] = [
    "Marketing digital: como começar do zero",
    "Marketing digital: erros que travam seu crescimento",
    "Finanças pessoais - montando sua reserva",
    "Finanças pessoais - saindo das dívidas",
    "Minha história: de hobby a profissão",
    "Produtividade | rotina matinal em 5 passos",
    "Produtividade | planejando a semana",
    "Receita rápida: almoço em 15 minutos",
    "Bastidores do canal e próximos projetos",
    "Como eu organizo meu calendário de conteúdo",
];

const BODY_OPENERS: [&str; 4] = [
    "Quando eu comecei, não fazia ideia do tamanho que isso ia tomar.",
    "Essa é a pergunta que mais recebo aqui.",
    "Separei um passo a passo direto ao ponto.",
    "Hoje o papo é sobre consistência e motivação.",
];

const CTA_SENTENCE: &str = "Se esse conteúdo te ajudou, inscreva-se e compartilhe com alguém!";
const HASHTAGS: &str = "#criadores #conteudo #dicas";

/// Deterministic demo dataset: one creator, `posts` items spread over the
/// last 90 days, each with a growing snapshot series.
pub fn generate_dataset(creator_id: &str, posts: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let now = Utc::now();

    let creator = Creator {
        id: creator_id.to_string(),
        name: "Criador Demo".to_string(),
        followers: rng.gen_range(2_000..50_000),
    };

    let mut content = Vec::with_capacity(posts);
    let mut performance = Vec::new();

    for index in 0..posts {
        let platform = Platform::ALL[rng.gen_range(0..Platform::ALL.len())];
        let published = now
            - Duration::days(rng.gen_range(2..90))
            - Duration::hours(rng.gen_range(0..24));

        let title = TITLES[index % TITLES.len()].to_string();
        let mut body = BODY_OPENERS[rng.gen_range(0..BODY_OPENERS.len())].to_string();
        for _ in 0..rng.gen_range(0..6) {
            body.push_str(" Repetir o processo toda semana é o que gera resultado composto.");
        }
        if rng.gen::<f64>() < 0.5 {
            body.push(' ');
            body.push_str(CTA_SENTENCE);
        }
        if rng.gen::<f64>() < 0.5 {
            body.push(' ');
            body.push_str(HASHTAGS);
        }

        let id = format!("post_{:x}", stable_hash64(&format!("{}:{}", creator_id, index)));
        let media_url = if rng.gen::<f64>() < 0.6 {
            Some(format!("https://cdn.example.com/media/{}.jpg", id))
        } else {
            None
        };

        let base_views = rng.gen_range(200..5_000) as f64;
        let snapshot_count = rng.gen_range(2..=4);
        for step in 0..snapshot_count {
            let growth = 1.0 + step as f64 * rng.gen_range(0.4..1.6);
            let views = (base_views * growth) as u64;
            let likes = (views as f64 * rng.gen_range(0.02..0.08)) as u64;
            let comments = (views as f64 * rng.gen_range(0.002..0.015)) as u64;
            let shares = (views as f64 * rng.gen_range(0.001..0.02)) as u64;
            performance.push(PerformanceSnapshot {
                content_id: id.clone(),
                platform,
                recorded_at: published + Duration::hours(3 + step as i64 * 12),
                views,
                likes,
                comments,
                shares,
            });
        }

        content.push(ContentItem {
            id,
            creator_id: creator_id.to_string(),
            title,
            body,
            platform,
            media_url,
            created_at: published - Duration::hours(2),
            published_at: published,
        });
    }

    Dataset {
        creators: vec![creator],
        content,
        performance,
    }
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
