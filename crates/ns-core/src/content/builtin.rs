//! The shipped story: scripts, subtitles, catalogs and scene rules.

use std::collections::BTreeMap;

use crate::dialogue::{DialogueLine, LineEffect, Mood, Script, ScriptId};
use crate::effect::Effect;
use crate::flags::StoryFlag;
use crate::interactable::{Interactable, InteractableKind};
use crate::scene::SceneId;
use crate::subtitle::Subtitle;

use super::pack::{ContentPack, LeftBoundary, TriggerRule};

const YAN: &str = "燕";
const STRANGER: &str = "？？？";
const OLD_VOICE: &str = "蒼老的聲音";
const WOMAN_VOICE: &str = "女性的聲音";
const MAN_VOICE: &str = "男性的聲音";

impl ContentPack {
    /// The built-in story content.
    pub fn builtin() -> Self {
        Self {
            scripts: scripts(),
            catalogs: catalogs(),
            subtitles: subtitles(),
            spawns: BTreeMap::from([
                (SceneId::Intro, 5.0),
                (SceneId::Forest, 5.0),
                (SceneId::Meeting, 2.0),
                (SceneId::Path, 5.0),
                (SceneId::Temple, 15.0),
            ]),
            triggers: triggers(),
            boundaries: vec![LeftBoundary {
                scene: SceneId::Temple,
                min_x: 12.0,
            }],
            block_notice: "有一種力量阻止我往左...".to_string(),
        }
    }
}

fn line(speaker: &str, text: &str, mood: Mood) -> DialogueLine {
    DialogueLine::new(speaker, text).with_mood(mood)
}

fn shaken(speaker: &str, text: &str, mood: Mood) -> DialogueLine {
    line(speaker, text, mood).with_effect(LineEffect::Shake)
}

fn scripts() -> Vec<Script> {
    use Mood::{Angry, Confused, Normal, Scared};

    vec![
        Script::new(
            ScriptId::Intro,
            vec![
                shaken(YAN, "幹嘛啊，把我弄來這種地方是想幹嘛？", Angry),
                shaken(YAN, "這裡到底是……算了，人都來了。往前走走看。", Normal),
                line(YAN, "反正我也不想待在原地。", Normal),
            ],
        ),
        Script::new(
            ScriptId::Meeting,
            vec![
                line(YAN, "什麼聲音？", Normal),
                line(STRANGER, "♩~", Normal),
                shaken(YAN, "幹嘛啦，出來！", Confused),
                line(STRANGER, "……", Normal),
                shaken(YAN, "你是誰？想幹嘛？", Confused),
                line(STRANGER, "花盆裡的朋友不見了，要找回來。", Normal),
                line(STRANGER, "你肯定知道怎麽做吧？", Normal),
                line(YAN, "我？爲什麽是我做？", Confused),
                line(STRANGER, "因爲是重要的客人。", Normal),
                line(YAN, "可以不要嗎？", Normal),
                line(STRANGER, "其實很好奇吧？", Normal),
                line(
                    STRANGER,
                    "雖然很害怕，但一定很~想知道找到之後會發生什麽吧？",
                    Normal,
                ),
                line(YAN, "嘖……", Angry),
                line(YAN, "（被説中了。）", Confused),
                line(
                    YAN,
                    "（而且，雖然這麽説很討厭，我的直覺很清楚那東西在哪。）",
                    Confused,
                ),
                shaken(YAN, "（這種感覺……之前有過嗎？）", Confused),
            ],
        ),
        Script::new(
            ScriptId::FoundSeed,
            vec![
                line(YAN, "掏出了怪怪的東西，這就是種子？", Confused),
                line(YAN, "不管了，丟到花盆裡。", Confused),
            ],
        ),
        Script::new(
            ScriptId::PlantedSeed,
            vec![
                line(YAN, "……這樣就可以了吧。", Confused),
                line(STRANGER, "嗯，走吧。大家都在等你。", Normal),
                line(YAN, "去哪？", Normal),
                line(STRANGER, "你原本想去的地方，我帶你去，作爲謝禮。", Normal),
                line(YAN, "（會這麽講話，看來她知道我想做什麽。）", Normal),
                line(YAN, "（跟上去吧，説不定她還真的會帶我去土界鎮。）", Normal),
            ],
        ),
        Script::new(
            ScriptId::LilyEncounter,
            vec![
                line(YAN, "好大的鹿子百合。", Normal),
                line(YAN, "本地人都是種花大師嗎。", Confused),
            ],
        ),
        Script::new(
            ScriptId::BeforeTemple,
            vec![
                line(STRANGER, "我們一起進去吧。", Normal),
                line(YAN, "那個，我趕時間去別的地方……", Confused),
                line(STRANGER, "不跟我一起走，就把你永遠留在這。", Normal),
                line(YAN, "好討厭的講話方式，進去就進去！", Angry),
                line(YAN, "（不過，那邊的匾上寫的是「九姑娘廟」吧？）", Confused),
                line(YAN, "（完全不想進去，但來都來了……）", Scared),
                shaken(YAN, "（説不定也能找到我正在尋找的東西。)", Normal),
            ],
        ),
        Script::new(
            ScriptId::TempleIntro,
            vec![
                line(STRANGER, "幫我的朋友最後一個忙吧。", Normal),
                line(
                    STRANGER,
                    "把她放在桌子上，點香……最後，你要喝下那杯酒。",
                    Normal,
                ),
            ],
        ),
        Script::new(
            ScriptId::TempleRepeat,
            vec![line(STRANGER, "時間不多了......", Normal)],
        ),
        Script::new(
            ScriptId::Shadows,
            vec![shaken(YAN, "牆上的影子......好像在動？", Scared)],
        ),
        Script::new(
            ScriptId::Climax,
            vec![
                shaken(STRANGER, "幹什麽，別礙事！", Angry),
                shaken(STRANGER, "走開，走開走開走開走開！", Angry),
            ],
        ),
    ]
}

fn subtitles() -> BTreeMap<SceneId, Vec<Subtitle>> {
    let voice = |id: &str, x: f32, text: &str, speaker: &str, ms: u64| {
        Subtitle::new(id, x, text)
            .with_speaker(speaker)
            .with_duration_ms(ms)
            .whispered()
    };

    BTreeMap::from([
        (
            SceneId::Forest,
            vec![
                voice("f1", 10.0, "清水為體，惡水為心；\n九姑娘前，萬物歸陰。", OLD_VOICE, 4500),
                voice("f2", 25.0, "幽香浮水，醉生夢死；\n九姑娘笑，眾生皆痴。", OLD_VOICE, 4500),
                voice("f3", 45.0, "好可憐......", WOMAN_VOICE, 3000),
                voice("f4", 60.0, "祭祀......\n別無他法......", MAN_VOICE, 4000),
                voice("f5", 75.0, "對不起......", WOMAN_VOICE, 3000),
                voice("f6", 88.0, "祭祀......", MAN_VOICE, 3000),
            ],
        ),
        (
            SceneId::Search,
            vec![
                Subtitle::new("s1", 15.0, "看不見嗎...").with_speaker(STRANGER),
                Subtitle::new("s2", 50.0, "就在這裡...").with_speaker(STRANGER),
            ],
        ),
    ])
}

fn altars() -> [Interactable; 3] {
    [
        Interactable::new("altar_flower", 30.0, "供花", InteractableKind::AltarFlower),
        Interactable::new("altar_incense", 50.0, "點香", InteractableKind::AltarIncense),
        Interactable::new("altar_wine", 70.0, "喝酒", InteractableKind::AltarWine),
    ]
}

fn catalogs() -> BTreeMap<SceneId, Vec<Interactable>> {
    let guide = || Interactable::new("ninesong", 15.0, "對話", InteractableKind::Guide);

    let mut temple = vec![
        guide(),
        Interactable::new("shadow_wall", 8.0, "黑影", InteractableKind::Shadow),
    ];
    temple.extend(altars());

    let mut climax = vec![guide()];
    climax.extend(altars());

    BTreeMap::from([
        (
            SceneId::Search,
            vec![
                Interactable::new("seed_spot", 65.0, "看取", InteractableKind::Seed),
                Interactable::new("pot", 75.0, "花盆", InteractableKind::Pot),
            ],
        ),
        (
            SceneId::Path,
            vec![
                Interactable::new("lily", 50.0, "看花", InteractableKind::Lily),
                Interactable::new("temple_door", 90.0, "進入", InteractableKind::Door),
            ],
        ),
        (SceneId::Temple, temple),
        (SceneId::Climax, climax),
    ])
}

fn triggers() -> Vec<TriggerRule> {
    vec![
        TriggerRule {
            scene: SceneId::Forest,
            beyond: 98.0,
            unless: None,
            effects: vec![Effect::Transition {
                scene: SceneId::Meeting,
                position: 2.0,
                on_midpoint: Vec::new(),
            }],
        },
        TriggerRule {
            scene: SceneId::Meeting,
            beyond: 60.0,
            unless: Some(StoryFlag::MetGuide),
            effects: vec![Effect::StartScript {
                script: ScriptId::Meeting,
                on_finish: vec![
                    Effect::SetFlag {
                        flag: StoryFlag::MetGuide,
                    },
                    Effect::SetScene {
                        scene: SceneId::Search,
                        position: None,
                    },
                    Effect::ShowVisionHint,
                ],
            }],
        },
    ]
}
