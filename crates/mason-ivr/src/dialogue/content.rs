//! Static per-language dialogue content: questions, confirmation
//! templates, error messages, and the keyword sets used for yes/no
//! detection. Adding a language means adding one [`LanguageContent`]
//! record and one `content()` arm; nothing else branches on language.

use std::fmt;

/// Languages the intake dialogue can run in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Ta];

    /// Wire code used by the transport and stored with the session.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
        }
    }

    /// Locale passed to the speech-to-text collaborator.
    pub fn stt_code(self) -> &'static str {
        match self {
            Language::En => "en-IN",
            Language::Hi => "hi-IN",
            Language::Ta => "ta-IN",
        }
    }

    /// Voice code passed to the speech-synthesis collaborator.
    pub fn tts_code(self) -> &'static str {
        self.code()
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownLanguage> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "ta" => Ok(Language::Ta),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised at the transport edge when a request carries an unsupported
/// language code.
#[derive(Debug, thiserror::Error)]
#[error("unsupported language code '{0}' (expected en, hi, or ta)")]
pub struct UnknownLanguage(pub String);

/// One piece of applicant data, collected in the fixed order of
/// [`Field::ORDER`] regardless of language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Age,
    Number,
    Address,
    Pay,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Name,
        Field::Age,
        Field::Number,
        Field::Address,
        Field::Pay,
    ];

    pub fn first() -> Field {
        Self::ORDER[0]
    }

    /// The field that follows this one, or `None` after the last.
    pub fn next(self) -> Option<Field> {
        let position = Self::ORDER.iter().position(|field| *field == self)?;
        Self::ORDER.get(position + 1).copied()
    }

    /// Wire name used in field snapshots.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Number => "number",
            Field::Address => "address",
            Field::Pay => "pay",
        }
    }
}

/// Per-field text block (one entry per collected field).
#[derive(Debug)]
pub struct FieldText {
    pub name: &'static str,
    pub age: &'static str,
    pub number: &'static str,
    pub address: &'static str,
    pub pay: &'static str,
}

impl FieldText {
    pub fn get(&self, field: Field) -> &'static str {
        match field {
            Field::Name => self.name,
            Field::Age => self.age,
            Field::Number => self.number,
            Field::Address => self.address,
            Field::Pay => self.pay,
        }
    }
}

/// Recovery messages spoken when validation or confirmation fails.
#[derive(Debug)]
pub struct ErrorMessages {
    pub number: &'static str,
    pub age: &'static str,
    pub pay: &'static str,
    pub empty: &'static str,
    pub retry: &'static str,
}

/// Everything the engine needs to speak one language: prompts,
/// confirmation templates (`{value}`), error messages, the keyword sets
/// for confirmation-intent detection, the transition prefix spoken when
/// a field is accepted, and the completion template (`{name}`,
/// `{number}`).
#[derive(Debug)]
pub struct LanguageContent {
    pub questions: FieldText,
    pub confirmations: FieldText,
    pub errors: ErrorMessages,
    pub affirmative: &'static [&'static str],
    pub negative: &'static [&'static str],
    pub advance_prefix: &'static str,
    pub completion: &'static str,
}

impl LanguageContent {
    pub fn question(&self, field: Field) -> &'static str {
        self.questions.get(field)
    }

    pub fn confirmation(&self, field: Field, value: &str) -> String {
        self.confirmations.get(field).replace("{value}", value)
    }

    pub fn retry(&self, field: Field) -> String {
        self.errors.retry.replace("{question}", self.question(field))
    }

    pub fn advance(&self, field: Field) -> String {
        format!("{} {}", self.advance_prefix, self.question(field))
    }

    pub fn completion(&self, name: &str, number: &str) -> String {
        self.completion
            .replace("{name}", name)
            .replace("{number}", number)
    }
}

/// Content lookup is total: every language has exactly one record.
pub fn content(language: Language) -> &'static LanguageContent {
    match language {
        Language::En => &EN,
        Language::Hi => &HI,
        Language::Ta => &TA,
    }
}

static EN: LanguageContent = LanguageContent {
    questions: FieldText {
        name: "Hello! Welcome to MASON job application. Let's get started. What's your full name?",
        age: "Great! And how old are you?",
        number: "Perfect. What's the best phone number to reach you at?",
        address: "Got it. Where do you currently live? Please tell me your full address.",
        pay: "Almost done! What monthly salary are you looking for?",
    },
    confirmations: FieldText {
        name: "I heard your name as {value}. Is that correct? Please say 'correct' or 'incorrect'.",
        age: "So you're {value} years old, right? Please say 'correct' or 'incorrect'.",
        number: "Let me confirm - your phone number is {value}. Is that right? Please say 'correct' or 'incorrect'.",
        address: "Your address is {value}. Did I get that correctly? Please say 'correct' or 'incorrect'.",
        pay: "You're looking for {value} rupees per month. Is that correct? Please say 'correct' or 'incorrect'.",
    },
    errors: ErrorMessages {
        number: "I didn't quite catch that. Could you please say your 10-digit phone number again? You can say it digit by digit if that helps.",
        age: "Sorry, I couldn't understand your age. Could you please tell me how old you are? Just say the number.",
        pay: "I couldn't catch the salary amount. Could you please tell me your expected monthly pay again?",
        empty: "Sorry, I didn't catch that. Could you please say 'correct' or 'incorrect'?",
        retry: "No problem! Let me ask again. {question}",
    },
    affirmative: &["correct", "right", "yes", "yeah", "yep", "ok", "okay"],
    negative: &["incorrect", "wrong", "no", "nope", "nah"],
    advance_prefix: "Excellent!",
    completion: "Perfect, {name}! We've got all your information. Thank you for applying with MASON! We'll review your application and get back to you soon at {number}. Have a great day!",
};

static HI: LanguageContent = LanguageContent {
    questions: FieldText {
        name: "नमस्ते! MASON नौकरी आवेदन में आपका स्वागत है। चलिए शुरू करते हैं। आपका पूरा नाम क्या है?",
        age: "बहुत अच्छा! और आपकी उम्र क्या है?",
        number: "बढ़िया। आपसे संपर्क करने के लिए सबसे अच्छा फोन नंबर क्या है?",
        address: "समझ गया। आप वर्तमान में कहाँ रहते हैं? कृपया अपना पूरा पता बताएं।",
        pay: "लगभग हो गया! आप कितनी मासिक वेतन की उम्मीद कर रहे हैं?",
    },
    confirmations: FieldText {
        name: "मैंने आपका नाम {value} सुना। क्या यह सही है? कृपया 'सही' या 'गलत' कहें।",
        age: "तो आप {value} साल के हैं, है ना? कृपया 'सही' या 'गलत' कहें।",
        number: "पुष्टि करता हूं - आपका फोन नंबर {value} है। क्या यह सही है? कृपया 'सही' या 'गलत' कहें।",
        address: "आपका पता {value} है। क्या मैंने सही समझा? कृपया 'सही' या 'गलत' कहें।",
        pay: "आप {value} रुपये प्रति माह की तलाश कर रहे हैं। क्या यह सही है? कृपया 'सही' या 'गलत' कहें।",
    },
    errors: ErrorMessages {
        number: "मुझे वह समझ नहीं आया। क्या आप कृपया अपना 10 अंकों का फोन नंबर फिर से बता सकते हैं? आप इसे अंक दर अंक बोल सकते हैं।",
        age: "क्षमा करें, मुझे आपकी उम्र समझ नहीं आई। कृपया बताएं कि आप कितने साल के हैं? बस संख्या बोलें।",
        pay: "मुझे वेतन राशि समझ नहीं आई। कृपया अपनी अपेक्षित मासिक वेतन फिर से बताएं?",
        empty: "क्षमा करें, मुझे वह समझ नहीं आया। कृपया 'सही' या 'गलत' कहें।",
        retry: "कोई बात नहीं! मैं फिर से पूछता हूं। {question}",
    },
    affirmative: &["सही", "ठीक", "हाँ", "जी", "बिल्कुल"],
    negative: &["गलत", "नहीं", "ना"],
    advance_prefix: "बहुत बढ़िया!",
    completion: "बिल्कुल सही, {name}! हमें आपकी सभी जानकारी मिल गई है। MASON के साथ आवेदन करने के लिए धन्यवाद! हम आपके आवेदन की समीक्षा करेंगे और जल्द ही {number} पर संपर्क करेंगे। आपका दिन शुभ हो!",
};

static TA: LanguageContent = LanguageContent {
    questions: FieldText {
        name: "வணக்கம்! MASON வேலை விண்ணப்பத்திற்கு வரவேற்கிறோம். தொடங்குவோம். உங்கள் முழு பெயர் என்ன?",
        age: "நல்லது! உங்கள் வயது என்ன?",
        number: "சரி. உங்களை தொடர்பு கொள்ள சிறந்த தொலைபேசி எண் என்ன?",
        address: "புரிந்தது. நீங்கள் தற்போது எங்கு வசிக்கிறீர்கள்? உங்கள் முழு முகவரியை சொல்லுங்கள்.",
        pay: "கிட்டத்தட்ட முடிந்தது! நீங்கள் எவ்வளவு மாதாந்திர சம்பளம் எதிர்பார்க்கிறீர்கள்?",
    },
    confirmations: FieldText {
        name: "உங்கள் பெயர் {value} என்று கேட்டேன். இது சரியா? 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
        age: "நீங்கள் {value} வயது, இல்லையா? 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
        number: "உறுதிப்படுத்துகிறேன் - உங்கள் தொலைபேசி எண் {value}. இது சரியா? 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
        address: "உங்கள் முகவரி {value}. நான் சரியாகப் புரிந்துகொண்டேனா? 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
        pay: "நீங்கள் மாதம் {value} ரூபாய் எதிர்பார்க்கிறீர்கள். இது சரியா? 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
    },
    errors: ErrorMessages {
        number: "எனக்கு அது புரியவில்லை. உங்கள் 10 இலக்க தொலைபேசி எண்ணை மீண்டும் சொல்ல முடியுமா? நீங்கள் அதை இலக்கம் இலக்கமாக சொல்லலாம்.",
        age: "மன்னிக்கவும், உங்கள் வயது புரியவில்லை. நீங்கள் எத்தனை வயது என்று சொல்ல முடியுமா? எண்ணை மட்டும் சொல்லுங்கள்.",
        pay: "சம்பள தொகை புரியவில்லை. உங்கள் எதிர்பார்க்கும் மாதாந்திர சம்பளத்தை மீண்டும் சொல்ல முடியுமா?",
        empty: "மன்னிக்கவும், எனக்கு அது புரியவில்லை. 'சரி' அல்லது 'தவறு' என்று சொல்லுங்கள்.",
        retry: "பரவாயில்லை! நான் மீண்டும் கேட்கிறேன். {question}",
    },
    affirmative: &["சரி", "ஆம்", "சரியானது", "நல்லது"],
    negative: &["தவறு", "இல்லை", "தவறானது"],
    advance_prefix: "அருமை!",
    completion: "சரியானது, {name}! உங்கள் அனைத்து தகவல்களையும் பெற்றுவிட்டோம். MASON உடன் விண்ணப்பித்ததற்கு நன்றி! உங்கள் விண்ணப்பத்தை மதிப்பாய்வு செய்து விரைவில் {number} இல் தொடர்பு கொள்வோம். நல்ல நாள்!",
};
