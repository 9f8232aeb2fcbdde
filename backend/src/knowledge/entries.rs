use shared::ClassLabel;

use super::AdvisoryEntry;

pub(super) static ENTRIES: [AdvisoryEntry; 7] = [
    AdvisoryEntry {
        label: ClassLabel::BacterialRedDisease,
        image_path: "image/bacterial.jpg",
        alternate_names: "Red Spot Disease, Epizootic Ulcerative Syndrome (EUS)",
        cause: "Usually a bacterial infection such as Aeromonas hydrophila or Pseudomonas sp., \
                often triggered by stress, poor water quality, or wounds on the body.",
        symptoms: &[
            "Red spots, rashes or ulcers on the skin, fins or base of the tail.",
            "Frayed or damaged fins.",
            "Lethargy, loss of appetite and isolation from the group.",
            "Bleeding in several parts of the body in severe cases.",
        ],
        treatment: &[
            "Quarantine: move the sick fish to a separate tank to stop the spread.",
            "Improve water quality: change 30-50% of the water regularly and keep pH, ammonia and nitrite at safe levels.",
            "Antibiotics: use a bath or medicated feed with Oxytetracycline or Enrofloxacin, following the dosage instructions.",
            "Aquarium salt: add non-iodized salt at 1-3 g per litre in the quarantine tank to reduce osmotic stress.",
        ],
        prevention: "Clean the tank and filter regularly, avoid overstocking, and feed \
                     good quality, varied food.",
        quick_advice: "Quarantine the fish, change 30-50% of the water and stabilise pH and ammonia. \
                       Treat with Oxytetracycline or Enrofloxacin at the recommended dose and add \
                       1-3 g of non-iodized aquarium salt per litre.",
    },
    AdvisoryEntry {
        label: ClassLabel::Aeromoniasis,
        image_path: "image/aeromon.png",
        alternate_names: "Dropsy, Pop-eye",
        cause: "Infection by bacteria of the genus Aeromonas that attacks internal organs, \
                usually in fish whose immune system is weakened by stress or poor water quality.",
        symptoms: &[
            "Abnormally swollen belly with raised scales (pinecone appearance).",
            "Protruding eyes.",
            "Wounds or ulcers on the body.",
            "Loss of balance while swimming.",
        ],
        treatment: &[
            "Quarantine immediately: the disease is contagious.",
            "Internal treatment: mix antibiotics such as Metronidazole or Kanamycin into the feed.",
            "Epsom salt bath: magnesium sulfate helps reduce fluid swelling; follow the recommended dose.",
        ],
        prevention: "Water quality management is key. Avoid sudden temperature changes and keep \
                     the tank clean.",
        quick_advice: "Quarantine the infected fish and keep the tank as clean as possible. \
                       Antibiotics such as Kanamycin or Metronidazole are commonly used; ask an \
                       expert about the dose.",
    },
    AdvisoryEntry {
        label: ClassLabel::BacterialGillDisease,
        image_path: "image/gill.jpg",
        alternate_names: "Bacterial Gill Disease",
        cause: "Bacteria such as Flavobacterium sp. infecting the gill filaments, common in \
                crowded tanks with low oxygen.",
        symptoms: &[
            "Swollen, pale or eroded gills.",
            "Gills covered by excess mucus.",
            "Laboured breathing, often gasping at the surface.",
            "Very fast movement of the gill covers.",
        ],
        treatment: &[
            "Increase oxygen: add aeration straight away.",
            "Improve water quality: change water to lower ammonia and nitrite.",
            "External treatment: short baths with Potassium Permanganate or Formalin, carefully and at the right dose.",
        ],
        prevention: "Do not overstock and make sure filtration and aeration work properly.",
        quick_advice: "Increase aeration and improve water quality. Salt baths help, and \
                       antibacterial treatments such as Acriflavine or Formalin can be used as directed.",
    },
    AdvisoryEntry {
        label: ClassLabel::Saprolegniasis,
        image_path: "image/fungal.jpg",
        alternate_names: "Cotton Wool Disease",
        cause: "Fungal infection by the genus Saprolegnia. It is opportunistic and only attacks \
                fish that are already weak, stressed or wounded.",
        symptoms: &[
            "Cotton-like white, grey or brownish growths on the skin, fins, eyes or mouth.",
        ],
        treatment: &[
            "Quarantine the infected fish.",
            "Antifungal treatment with Malachite Green or Methylene Blue.",
            "Short baths in a stronger aquarium salt solution.",
        ],
        prevention: "Avoid injuring fish when moving them and keep water quality high so the \
                     fish are not stressed.",
        quick_advice: "Use an antifungal such as Malachite Green or Methylene Blue, keep the water \
                       temperature stable and clean, and keep the fish in quarantine during treatment.",
    },
    AdvisoryEntry {
        label: ClassLabel::HealthyFish,
        image_path: "image/healty.jpg",
        alternate_names: "Healthy Fish",
        cause: "The ideal condition, reached through good care.",
        symptoms: &[
            "Swims actively and responds to its surroundings.",
            "Bright body colour, not dull.",
            "Fins and tail fully spread with no tears.",
            "Clear eyes, not cloudy or protruding.",
            "No spots, patches, wounds or unusual mucus on the body.",
            "Calm breathing and a good appetite.",
        ],
        treatment: &["No treatment needed. Keep up the good care."],
        prevention: "Water quality, nutritious food and a stress-free environment are the three \
                     pillars of keeping fish healthy.",
        quick_advice: "Your fish looks healthy! Keep the water clean and keep feeding it well.",
    },
    AdvisoryEntry {
        label: ClassLabel::ParasiticDiseases,
        image_path: "image/parasit.jpg",
        alternate_names: "Parasitic Disease (e.g. White Spot, Fish Lice)",
        cause: "Parasitic organisms living on the skin, gills or internal organs of the fish.",
        symptoms: &[
            "White Spot (Ich): small salt-like white dots all over the body and fins.",
            "Fish lice (Argulus): flat, transparent parasites attached firmly to the skin.",
            "Fish rubbing their bodies against decorations or the tank walls (flashing).",
        ],
        treatment: &[
            "Anti-parasite medication containing Malachite Green, Formalin or Copper Sulfate (careful with sensitive species).",
            "Raise the temperature (White Spot only): slowly raising the water to 28-30°C speeds up the Ich life cycle and makes it easier to treat.",
            "Keep the substrate clean: siphon the bottom regularly because some parasites breed there.",
        ],
        prevention: "Quarantine new fish before adding them to the main tank and avoid live food \
                     of unknown cleanliness.",
        quick_advice: "Raise the water temperature gradually to 28-30°C for White Spot, use an \
                       anti-parasite treatment with Malachite Green and Formalin, and keep the \
                       substrate clean.",
    },
    AdvisoryEntry {
        label: ClassLabel::WhiteTailDisease,
        image_path: "image/white.jpg",
        alternate_names: "White Tail Disease",
        cause: "A highly contagious viral infection, often fatal and hard to treat.",
        symptoms: &[
            "Milky or opaque white colour starting at the base of the tail (peduncle) and spreading over the tail fin.",
        ],
        treatment: &[
            "There is currently no effective antiviral medication for fish and treatment usually fails.",
            "Humanely euthanise severely infected fish to stop the spread to other fish.",
        ],
        prevention: "Prevention is the only effective approach: keep water quality at its best, \
                     feed highly nutritious food to support immunity, and quarantine new or \
                     symptomatic fish immediately.",
        quick_advice: "There is no effective antiviral for fish yet. Focus on prevention with good \
                       water quality and nutrition, and separate infected fish immediately to \
                       prevent an outbreak.",
    },
];
